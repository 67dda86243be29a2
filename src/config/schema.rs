//! Field tree declarations for configuration structures.
//!
//! A configuration type describes its own fields by implementing [`Schema`].
//! Leaves carry an optional default literal next to the field name; nested
//! records are handed to [`Fields::nested`], which resolves them through any
//! indirection before recursing.
//!
//! ```
//! use confload::config::{Fields, Schema};
//!
//! struct Server {
//!     port: u16,
//!     host: String,
//! }
//!
//! impl Schema for Server {
//!     fn describe(&self, fields: &mut Fields<'_>) {
//!         fields.leaf("port", "8080").leaf("host", "localhost");
//!     }
//! }
//!
//! struct AppConfig {
//!     server: Server,
//!     tls: Option<Box<Server>>,
//! }
//!
//! impl Schema for AppConfig {
//!     fn describe(&self, fields: &mut Fields<'_>) {
//!         fields.nested("server", &self.server).nested("tls", &self.tls);
//!     }
//! }
//! ```
//!
//! Declared names are registered lowercase and the merged view is keyed the
//! same way. Field names as serde sees them must therefore be lowercase:
//! `#[serde(rename = "Server")]` or `rename_all = "camelCase"` on a loaded
//! structure leaves those fields unmatched. Use `snake_case` names.

use super::registry::Fields;
use std::rc::Rc;
use std::sync::Arc;

/// Upcast to a schema trait object.
///
/// Implemented for every sized [`Schema`]; trait objects get it through the
/// supertrait relationship.
pub trait AsSchema {
    fn as_schema(&self) -> &dyn Schema;
}

impl<T: Schema> AsSchema for T {
    fn as_schema(&self) -> &dyn Schema {
        self
    }
}

/// A configuration record whose fields can be walked.
pub trait Schema: AsSchema {
    /// Declare this record's fields, in declaration order.
    fn describe(&self, fields: &mut Fields<'_>);

    /// Concrete record behind this value.
    ///
    /// Wrappers follow their indirection; `None` means the value is absent
    /// (an empty `Option`) and nothing below it is registered.
    fn resolve(&self) -> Option<&dyn Schema> {
        Some(self.as_schema())
    }
}

impl<T: Schema> Schema for Option<T> {
    fn describe(&self, fields: &mut Fields<'_>) {
        if let Some(inner) = self.resolve() {
            inner.describe(fields);
        }
    }

    fn resolve(&self) -> Option<&dyn Schema> {
        self.as_ref().and_then(|inner| inner.resolve())
    }
}

macro_rules! forward_schema {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Schema + ?Sized> Schema for $wrapper<T> {
                fn describe(&self, fields: &mut Fields<'_>) {
                    (**self).describe(fields)
                }

                fn resolve(&self) -> Option<&dyn Schema> {
                    (**self).resolve()
                }
            }
        )*
    };
}

forward_schema!(Box, Rc, Arc);

impl<T: Schema + ?Sized> Schema for &T {
    fn describe(&self, fields: &mut Fields<'_>) {
        (**self).describe(fields)
    }

    fn resolve(&self) -> Option<&dyn Schema> {
        (**self).resolve()
    }
}
