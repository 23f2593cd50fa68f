extern crate self as mockgen;

pub mod batch;
pub mod config;
pub mod error;
pub mod imports;
pub mod interface;
pub mod misc;
pub mod mock;
pub mod nilable;
pub mod types;

pub use mockgen_macros::{go_interface, go_method, go_type};

pub use batch::{generate_all, Generated};
pub use config::Options;
pub use error::{Error, Result, Shape};
pub use imports::{ImportEntry, ImportResolver};
pub use interface::{Declarations, Interface, Method, Parameter, TypeDecl};
pub use misc::exported_mock_name;
pub use mock::Generator;
pub use nilable::{is_nilable, Extraction};
pub use types::{ChanDir, TypeExpr};
