//! Rule sets applied to a loaded feed.
//!
//! Each rule set is a pure function of the document. Structural and content
//! rules also expose a per-node entry point so the validator can isolate and
//! parallelize them entity by entity.

pub mod content;
pub mod seo;
pub mod structure;
pub mod text;

pub use content::{check_content_quality, TextCategory, TextItem};
pub use seo::{analyze_seo, check_seo, SeoAnalysis, SeoReport};
pub use structure::check_structure;
