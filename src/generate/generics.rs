use anyhow::{Result, bail};
use javabind_meta::{InterfaceImpl, TypeDef};
use javabind_naming::{slash_path, strip_delimiters};

/// Namespace reserved for the parametric collection interfaces the
/// canonicalizer recognizes. Anything else in this namespace is a
/// metadata-contract violation.
pub const COLLECTIONS_NAMESPACE: &str = "Windows.Foundation.Collections.";

/// The closed set of known generic collection kinds. Variant order is
/// significant: it fixes both prefix-match priority (`IVectorView` before
/// `IVector`, `IMapView` before `IMap`) and emission order among generic
/// interface entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GenericKind {
    Iterable,
    VectorView,
    Vector,
    ObservableVector,
    MapView,
    Map,
    ObservableMap,
}

pub struct GenericInterfaceInfo {
    /// Unqualified metadata interface name prefix, e.g. `IIterable`.
    pub interface_name: &'static str,
    /// Bridge-side base binding structure the stub derives from.
    pub base_class: &'static str,
    /// Name of the compile-time trait constant emitted into the stub.
    pub base_trait: &'static str,
    /// Suffix appended to the synthesized projection name.
    pub projected: &'static str,
    /// Java surface type listed in the `implements` clause.
    pub java_class: &'static str,
}

static GENERIC_INTERFACES: [GenericInterfaceInfo; 7] = [
    GenericInterfaceInfo {
        interface_name: "IIterable",
        base_class: "Iterable",
        base_trait: "iterator_type",
        projected: "Iterator",
        java_class: "java.lang.Iterable",
    },
    GenericInterfaceInfo {
        interface_name: "IVectorView",
        base_class: "VectorView",
        base_trait: "vector_view_type",
        projected: "VectorView",
        java_class: "java.lang.VectorView",
    },
    GenericInterfaceInfo {
        interface_name: "IVector",
        base_class: "Vector",
        base_trait: "vector_type",
        projected: "Vector",
        java_class: "java.lang.Vector",
    },
    GenericInterfaceInfo {
        interface_name: "IObservableVector",
        base_class: "ObservableVector",
        base_trait: "observable_vector_type",
        projected: "ObservableVector",
        java_class: "javafx.collections.ObservableList",
    },
    GenericInterfaceInfo {
        interface_name: "IMapView",
        base_class: "MapView",
        base_trait: "map_view_type",
        projected: "MapView",
        java_class: "java.lang.MapView",
    },
    GenericInterfaceInfo {
        interface_name: "IMap",
        base_class: "Map",
        base_trait: "map_type",
        projected: "Map",
        java_class: "java.lang.Map",
    },
    GenericInterfaceInfo {
        interface_name: "IObservableMap",
        base_class: "ObservableMap",
        base_trait: "observable_map_type",
        projected: "ObservableMap",
        java_class: "javafx.collections.ObservableMap",
    },
];

impl GenericKind {
    pub const ALL: [GenericKind; 7] = [
        GenericKind::Iterable,
        GenericKind::VectorView,
        GenericKind::Vector,
        GenericKind::ObservableVector,
        GenericKind::MapView,
        GenericKind::Map,
        GenericKind::ObservableMap,
    ];

    pub fn info(self) -> &'static GenericInterfaceInfo {
        &GENERIC_INTERFACES[self as usize]
    }

    /// Matches an unqualified collections-namespace interface name by
    /// prefix, in variant order.
    pub fn from_interface_name(unqualified: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| unqualified.starts_with(kind.info().interface_name))
    }
}

/// Identity key of one canonicalized interface entry: a known generic
/// collection kind, or the raw interface name for everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InterfaceKey {
    Generic(GenericKind),
    Named(String),
}

/// A type's effective interface set: deduplicated by key (last write wins)
/// and ordered for emission with generic kinds first, in variant order,
/// followed by named interfaces in encounter order.
pub struct InterfaceSet {
    entries: Vec<(InterfaceKey, InterfaceImpl)>,
}

impl InterfaceSet {
    pub fn canonicalize(type_def: &TypeDef) -> Result<Self> {
        let mut set = Self {
            entries: Vec::new(),
        };
        for ifc in &type_def.interfaces {
            let key = if let Some(relative) = ifc.name.strip_prefix(COLLECTIONS_NAMESPACE) {
                match GenericKind::from_interface_name(relative) {
                    Some(kind) => InterfaceKey::Generic(kind),
                    None => bail!(
                        "unknown collections interface `{}` implemented by {}",
                        ifc.name,
                        type_def.qualified_name()
                    ),
                }
            } else {
                InterfaceKey::Named(ifc.name.clone())
            };
            set.insert(key, ifc.clone());
        }
        // Stable sort keeps encounter order among named keys.
        set.entries.sort_by_key(|(key, _)| match key {
            InterfaceKey::Generic(kind) => (0, *kind as usize),
            InterfaceKey::Named(_) => (1, 0),
        });
        Ok(set)
    }

    fn insert(&mut self, key: InterfaceKey, ifc: InterfaceImpl) {
        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            slot.1 = ifc;
        } else {
            self.entries.push((key, ifc));
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &(InterfaceKey, InterfaceImpl)> {
        self.entries.iter()
    }

    pub fn generic_entries(&self) -> impl Iterator<Item = (GenericKind, &InterfaceImpl)> {
        self.entries.iter().filter_map(|(key, ifc)| match key {
            InterfaceKey::Generic(kind) => Some((*kind, ifc)),
            InterfaceKey::Named(_) => None,
        })
    }

    pub fn named_entries(&self) -> impl Iterator<Item = (&str, &InterfaceImpl)> {
        self.entries.iter().filter_map(|(key, ifc)| match key {
            InterfaceKey::Named(name) => Some((name.as_str(), ifc)),
            InterfaceKey::Generic(_) => None,
        })
    }
}

/// Innermost generic argument frame of an implemented interface. Generic
/// interface entries always carry at least one frame; an empty stack is a
/// metadata-contract violation.
pub fn innermost_args(ifc: &InterfaceImpl) -> Result<&[String]> {
    match ifc.generic_param_stack.last() {
        Some(frame) => Ok(frame),
        None => bail!(
            "generic interface `{}` carries no argument frame",
            ifc.name
        ),
    }
}

/// Derives the synthesized projection name for one instantiation of a
/// generic collection kind: the argument spellings, delimiters stripped,
/// followed by the kind's projected suffix. `Vector` of `String` becomes
/// `StringVector`.
pub fn synthesized_name(kind: GenericKind, args: &[String]) -> String {
    format!("{}{}", strip_delimiters(&args.join(",")), kind.info().projected)
}

/// One recorded Iterable instantiation, consumed later to emit a single
/// iterator proxy artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericIterator {
    /// Synthesized projection name; the deduplication key.
    pub name: String,
    /// Native argument-type spelling for the bridge template.
    pub native_element: String,
    /// Managed element spelling in slash-qualified class-path form.
    pub java_element: String,
}

/// Slash-qualified class path for an Iterable element: dotted spellings map
/// their own path, bare spellings resolve within the current namespace.
pub fn java_element_path(args_joined: &str, current_namespace: &str) -> String {
    if args_joined.contains('.') {
        slash_path(args_joined)
    } else {
        format!("{}/{args_joined}", slash_path(current_namespace))
    }
}
