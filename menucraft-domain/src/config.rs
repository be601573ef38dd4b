// Neutral configuration tree
// The file-loading layer (YAML, in practice) converts its document into this
// tree; the parser only ever sees these types.

pub mod section;
pub mod value;

pub use section::*;
pub use value::*;

use crate::value_objects::MenuFileName;

/// One menu configuration file, already read and syntactically parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMenuFile {
    pub file_name: MenuFileName,
    pub root: ConfigSection,
}
