//! Model runtime seam for the multi-task gateway.
//!
//! [`CodeModel`] and [`VisionModel`] are the only way the gateway reaches a
//! model. The bundled implementations talk to remote inference workers over
//! HTTP; tests and embedders can supply their own.

pub mod chat_completions;
pub mod error;
pub mod generate;
pub mod http;
pub mod image;
pub mod template;
pub mod traits;

pub use chat_completions::ChatCompletionsWorker;
pub use error::{ImageInputError, RuntimeError, RuntimeResult};
pub use generate::GenerateWorker;
pub use http::WorkerConfig;
pub use self::image::ImageInput;
pub use template::{render_deepseek_vl, DEEPSEEK_VL_SYSTEM_PROMPT};
pub use traits::{CodeModel, VisionModel};
