//! Player-location template formatting.

use crate::vars::NOT_AVAILABLE;

/// Side length of one exterior world-grid cell, in game units.
pub const WORLD_CELL_SIZE: f32 = 4096.0;

/// Substitute the location token vocabulary into a user template.
///
/// `pos` must be fully finite; a NaN or infinity anywhere means the player
/// object is in a bad state and the whole result degrades to the sentinel.
/// The two names are different: they are routinely absent (interiors have no
/// worldspace, the main menu has no cell), so a missing name substitutes as
/// an empty string instead of failing the template.
///
/// Grid coordinates are derived for x and y only; the world grid is 2-D.
pub fn format_location(
    template: &str,
    pos: [f32; 3],
    cell_name: Option<&str>,
    worldspace_name: Option<&str>,
) -> String {
    if pos.iter().any(|coordinate| !coordinate.is_finite()) {
        return NOT_AVAILABLE.to_string();
    }

    let grid = |coordinate: f32| ((coordinate / WORLD_CELL_SIZE).floor() as i32).to_string();

    let substitutions: [(&str, String); 7] = [
        ("%x", format!("{:.0}", pos[0])),
        ("%y", format!("{:.0}", pos[1])),
        ("%z", format!("{:.0}", pos[2])),
        ("%cx", grid(pos[0])),
        ("%cy", grid(pos[1])),
        ("%wn", worldspace_name.unwrap_or("").to_string()),
        ("%cn", cell_name.unwrap_or("").to_string()),
    ];

    let mut out = template.to_string();
    for (token, value) in &substitutions {
        out = out.replace(token, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let formatted = format_location(
            "%wn, %cn: %x %y %z",
            [12544.0, -7423.0, 512.0],
            Some("Dragonsreach"),
            Some("Whiterun"),
        );
        assert_eq!(formatted, "Whiterun, Dragonsreach: 12544 -7423 512");
    }

    #[test]
    fn test_grid_cell_floors_toward_negative() {
        let formatted = format_location("%cx %cy", [4100.0, -10.0, 0.0], None, None);
        assert_eq!(formatted, "1 -1");
    }

    #[test]
    fn test_grid_cell_only_covers_x_and_y() {
        // No %cz token; it stays verbatim.
        let formatted = format_location("%cx %cy %cz", [0.0, 0.0, 9000.0], None, None);
        assert_eq!(formatted, "0 0 %cz");
    }

    #[test]
    fn test_non_finite_coordinate_is_unavailable() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let formatted = format_location("%x", [0.0, bad, 0.0], None, None);
            assert_eq!(formatted, NOT_AVAILABLE);
        }
    }

    #[test]
    fn test_missing_names_substitute_empty() {
        let formatted = format_location("[%wn|%cn]", [1.0, 2.0, 3.0], None, None);
        assert_eq!(formatted, "[|]");
    }

    #[test]
    fn test_replacement_text_is_not_rescanned() {
        // %z is substituted before %cn; a cell name that happens to contain
        // token syntax must come through verbatim.
        let formatted = format_location("%cn %z", [1.0, 2.0, 3.0], Some("100%z pure"), None);
        assert_eq!(formatted, "100%z pure 3");
    }

    #[test]
    fn test_template_without_tokens_is_unchanged() {
        let formatted = format_location("nothing here", [1.0, 2.0, 3.0], None, None);
        assert_eq!(formatted, "nothing here");
    }
}
