#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]

mod config;
mod namespace;

pub use config::NamespaceConfig;
pub use namespace::Namespace;

pub mod model {
    pub use rdf_iv_model::*;
}

pub mod encoding {
    pub use rdf_iv_encoding::*;
}
