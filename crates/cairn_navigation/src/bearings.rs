/// Parses the `;`-delimited bearings parameter into one slot per waypoint
/// position. A slot is the angle before the first `,`; a tolerance after it
/// is parsed past and dropped. Parsing is total: malformed angle text
/// becomes an empty slot, never an error.
pub fn parse_bearing_list(input: &str) -> Vec<Option<f64>> {
    if input.is_empty() {
        return Vec::new();
    }

    input
        .split(';')
        .map(|slot| {
            slot.split(',')
                .next()
                .and_then(|angle| angle.parse::<f64>().ok())
        })
        .collect()
}
