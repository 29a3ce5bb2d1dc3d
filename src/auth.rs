//! Auth-domain values: scope lists, access tokens, and resource owners.

pub mod owner;
pub mod scope;
pub mod token;

pub use owner::*;
pub use scope::*;
pub use token::{access::*, secret::*};
