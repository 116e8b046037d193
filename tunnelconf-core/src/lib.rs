//! Canonical model, parsers, generators and validation for I2P tunnel configs.
//!
//! Three dialects are supported: Java router properties, i2pd INI and a
//! `tunnels:` YAML document. Every parser produces a [`TunnelConfig`] and every
//! generator consumes one.

pub mod coerce;
pub mod convert;
pub mod dialect;
pub mod error;
pub mod fault;
pub mod model;
pub mod parser;
pub mod session;
pub mod validate;
pub mod writer;

pub use coerce::{coerce, BoolVocabulary};
pub use convert::{detect_dialect, Converter};
pub use dialect::{Dialect, UnknownDialect};
pub use error::{ConvertError, GenerateError, ParseError, ValidationError, ValidationFailure};
pub use fault::ParseFault;
pub use model::{OptionGroup, OptionValue, TunnelConfig};
pub use parser::{parse, parse_file};
pub use session::session_options;
pub use validate::{validate, TunnelSpec, TUNNEL_SPECS};
pub use writer::{generate, write_file};
