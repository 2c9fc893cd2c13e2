use super::types::ModelDescriptor;

/// Whitespace-split fields of every data row, header and blank rows skipped
fn data_rows(listing: &str) -> impl Iterator<Item = Vec<&str>> {
    listing
        .lines()
        .skip(1) // Skip header line
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .filter(|fields| !fields.is_empty())
}

/// Parse the listing into descriptors.
///
/// Rows need at least name, size and a timestamp; everything after the size
/// column is joined back together as the timestamp.
pub fn parse_descriptors(listing: &str) -> Vec<ModelDescriptor> {
    data_rows(listing)
        .filter(|fields| fields.len() >= 3)
        .map(|fields| ModelDescriptor {
            name: fields[0].to_string(),
            size_label: fields[1].to_string(),
            installed_at: fields[2..].join(" "),
        })
        .collect()
}

/// First field of every data row, regardless of how many columns it has
pub fn parse_names(listing: &str) -> Vec<String> {
    data_rows(listing)
        .map(|fields| fields[0].to_string())
        .collect()
}
