pub mod generation;
pub mod metrics;
pub mod providers;

pub use generation::{Attachment, AttachmentKind, GenerationRequest, GenerationService};
pub use self::metrics::{get_metrics, init_metrics};
