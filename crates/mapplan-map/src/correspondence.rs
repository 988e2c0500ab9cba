//! Pairing of destination properties with source properties.

use mapplan_model::{NameMatching, PairOverrides, PropertyOverrides, PropertySchema, TypeSchema};

/// Outcome of looking up the source side of one destination property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMatch<'s> {
    Found(&'s PropertySchema),
    /// No convention match and no rename.
    Missing,
    /// A rename named a property the source does not declare.
    DanglingRename(&'s str),
    /// A property matched but has no getter.
    NotReadable(&'s PropertySchema),
}

impl<'s> SourceMatch<'s> {
    pub fn property(&self) -> Option<&'s PropertySchema> {
        match *self {
            Self::Found(property) => Some(property),
            _ => None,
        }
    }
}

/// One writable destination property and what it reads from.
#[derive(Debug, Clone, Copy)]
pub struct Correspondence<'s> {
    pub destination: &'s PropertySchema,
    pub source: SourceMatch<'s>,
    pub overrides: Option<&'s PropertyOverrides>,
}

/// Resolves correspondences for every writable, non-ignored destination
/// property, in destination declaration order.
///
/// Ignored properties and properties without a setter produce no entry at
/// all. Every other property produces exactly one entry, whose `source`
/// records whether a readable source property was found.
pub fn resolve<'s>(
    source: &'s TypeSchema,
    dest: &'s TypeSchema,
    overrides: Option<&'s PairOverrides>,
    matching: NameMatching,
) -> Vec<Correspondence<'s>> {
    dest.writable_properties()
        .filter_map(|destination| {
            let property_overrides = overrides.and_then(|o| o.get(&destination.name));
            if property_overrides.is_some_and(|o| o.ignore) {
                tracing::trace!(
                    dest = %dest.id,
                    property = %destination.name,
                    "destination property ignored"
                );
                return None;
            }
            let rename = property_overrides.and_then(|o| o.rename.as_deref());
            let lookup = rename.unwrap_or(&destination.name);
            let found = find_property(source, lookup, matching);
            let source_match = match (found, rename) {
                (Some(property), _) if property.readable => SourceMatch::Found(property),
                (Some(property), _) => SourceMatch::NotReadable(property),
                (None, Some(rename)) => SourceMatch::DanglingRename(rename),
                (None, None) => SourceMatch::Missing,
            };
            Some(Correspondence {
                destination,
                source: source_match,
                overrides: property_overrides,
            })
        })
        .collect()
}

/// Finds a property by name under the session's matching rule.
pub fn find_property<'s>(
    schema: &'s TypeSchema,
    name: &str,
    matching: NameMatching,
) -> Option<&'s PropertySchema> {
    match matching {
        NameMatching::Exact => schema.property(name),
        NameMatching::IgnoreCase => schema.property_ignore_case(name),
    }
}
