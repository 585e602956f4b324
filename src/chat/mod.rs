pub mod markup;
pub mod merge;
pub mod panel;
pub mod transcript;

pub use transcript::HtmlTranscript;
