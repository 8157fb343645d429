//! Internal macro generating the per-version resource model.
//!
//! Both schema-version modules declare their closed kind set once; the macro
//! derives the tagged `Resource` enum, the `ResourceKind` tag enum and the
//! uniform identifier accessors from it, keeping the two versions
//! structurally identical without hand-written dispatch.

macro_rules! resource_model {
    ($($kind:ident),+ $(,)?) => {
        /// Closed tag set over the concrete resource kinds of this schema
        /// version.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ResourceKind {
            $($kind,)+
        }

        impl ResourceKind {
            /// All kinds of this schema version, in declaration order.
            pub const ALL: &'static [ResourceKind] = &[$(ResourceKind::$kind,)+];

            /// The FHIR `resourceType` name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ResourceKind::$kind => stringify!($kind),)+
                }
            }
        }

        impl std::fmt::Display for ResourceKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        /// A concrete resource of this schema version, tagged by
        /// `resourceType` on the wire.
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(tag = "resourceType")]
        pub enum Resource {
            $($kind($kind),)+
        }

        impl Resource {
            /// The kind tag of this resource.
            pub fn kind(&self) -> ResourceKind {
                match self {
                    $(Resource::$kind(_) => ResourceKind::$kind,)+
                }
            }

            /// The FHIR `resourceType` name.
            pub fn kind_name(&self) -> &'static str {
                self.kind().as_str()
            }

            /// The logical identifier, if present.
            pub fn id(&self) -> Option<&str> {
                match self {
                    $(Resource::$kind(inner) => inner.id.as_deref(),)+
                }
            }

            /// Overwrites the logical identifier.
            pub fn set_id(&mut self, id: String) {
                match self {
                    $(Resource::$kind(inner) => inner.id = Some(id),)+
                }
            }
        }

        $(
            impl From<$kind> for Resource {
                fn from(inner: $kind) -> Self {
                    Resource::$kind(inner)
                }
            }
        )+
    };
}

/// Declares resource kinds whose date semantics are undefined: only the
/// identifier is modeled, every other wire field passes through `extra`.
macro_rules! simple_resources {
    ($version:literal : $($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!($version, " `", stringify!($name), "` resource.")]
            #[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
            #[serde(rename_all = "camelCase")]
            pub struct $name {
                #[serde(skip_serializing_if = "Option::is_none")]
                pub id: Option<String>,
                #[serde(flatten)]
                pub extra: serde_json::Map<String, serde_json::Value>,
            }
        )+
    };
}

pub(crate) use {resource_model, simple_resources};
