// Table identities: the stable mapping between an (area, channel) pair and
// the name of the table holding its records.

use rubric_scoring::TABLE_SEPARATOR;

/// Derives the table identity for an (area, channel) pair. The same inputs
/// always produce the same identity.
pub fn format(area: &str, channel: &str) -> String {
    format!("{}{}{}", area, TABLE_SEPARATOR, channel)
}

/// Recovers the (area, channel) pair from a table identity, splitting on
/// the first occurrence of the separator. Names that do not contain the
/// separator are not table identities and yield `None`; callers skip them.
pub fn parse(name: &str) -> Option<(String, String)> {
    name.split_once(TABLE_SEPARATOR)
        .map(|(area, channel)| (area.trim().to_string(), channel.trim().to_string()))
}
