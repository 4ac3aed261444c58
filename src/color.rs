// src/color.rs
//
// Directors get a fixed color each; anything else is treated as a genre and
// looked up lowercase. Keys found in neither table fall back to a neutral gray.

use ratatui::style::Color;

const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub const DEFAULT_COLOR: Color = hex(0x8E8E8E);

pub const DIRECTOR_COLORS: &[(&str, Color)] = &[
    ("Alfred Hitchcock", hex(0x4A6FA5)),
    ("Billy Wilder", hex(0xB5838D)),
    ("Akira Kurosawa", hex(0xC0392B)),
    ("Stanley Kubrick", hex(0xE74C3C)),
    ("Sergio Leone", hex(0xD35400)),
    ("Francis Ford Coppola", hex(0x8E44AD)),
    ("Steven Spielberg", hex(0x3498DB)),
    ("John Carpenter", hex(0x16A085)),
    ("Ridley Scott", hex(0x27AE60)),
    ("James Cameron", hex(0x2980B9)),
    ("David Lynch", hex(0x9B59B6)),
    ("Martin Scorsese", hex(0xC0784B)),
    ("Coen Brothers", hex(0xF1C40F)),
    ("Quentin Tarantino", hex(0xE67E22)),
    ("David Fincher", hex(0x2C3E50)),
    ("Paul Thomas Anderson", hex(0x1ABC9C)),
    ("Wes Anderson", hex(0xF39C9C)),
    ("Christopher Nolan", hex(0x34495E)),
    ("Guillermo del Toro", hex(0x7D3C98)),
    ("Bong Joon-ho", hex(0x5DADE2)),
    ("Denis Villeneuve", hex(0xA04000)),
    ("Hayao Miyazaki", hex(0x58D68D)),
];

pub const GENRE_COLORS: &[(&str, Color)] = &[
    ("sci-fi", hex(0x00B4D8)),
    ("horror", hex(0x9D0208)),
    ("thriller", hex(0x6A040F)),
    ("drama", hex(0x7B2CBF)),
    ("comedy", hex(0xFFB703)),
    ("western", hex(0xBC6C25)),
    ("noir", hex(0x495057)),
    ("crime", hex(0x370617)),
    ("war", hex(0x606C38)),
    ("animation", hex(0x80ED99)),
    ("fantasy", hex(0xC77DFF)),
    ("action", hex(0xF77F00)),
    ("romance", hex(0xFF8FAB)),
    ("mystery", hex(0x3A0CA3)),
    ("documentary", hex(0x8D99AE)),
    ("musical", hex(0xF72585)),
];

/// Pure lookup over the two static tables.
#[derive(Debug, Clone, Copy)]
pub struct ColorResolver {
    directors: &'static [(&'static str, Color)],
    genres: &'static [(&'static str, Color)],
    default: Color,
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self { directors: DIRECTOR_COLORS, genres: GENRE_COLORS, default: DEFAULT_COLOR }
    }
}

impl ColorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, key: &str) -> Color {
        if let Some((_, color)) = self.directors.iter().find(|(name, _)| *name == key) {
            return *color;
        }
        let genre = key.to_lowercase();
        self.genres
            .iter()
            .find(|(name, _)| *name == genre)
            .map(|(_, color)| *color)
            .unwrap_or(self.default)
    }

    pub fn default_color(&self) -> Color {
        self.default
    }
}

/// `#rrggbb` for RGB colors, the ratatui name otherwise.
pub fn to_hex(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_director_gets_fixed_color() {
        let resolver = ColorResolver::new();
        assert_eq!(resolver.resolve("Stanley Kubrick"), hex(0xE74C3C));
        assert_eq!(resolver.resolve("Stanley Kubrick"), resolver.resolve("Stanley Kubrick"));
    }

    #[test]
    fn test_genre_lookup_is_case_insensitive() {
        let resolver = ColorResolver::new();
        assert_eq!(resolver.resolve("Sci-Fi"), hex(0x00B4D8));
        assert_eq!(resolver.resolve("HORROR"), resolver.resolve("horror"));
    }

    #[test]
    fn test_unknown_keys_share_the_default() {
        let resolver = ColorResolver::new();
        assert_eq!(resolver.resolve("Nobody In Particular"), DEFAULT_COLOR);
        assert_eq!(resolver.resolve(""), DEFAULT_COLOR);
        assert_eq!(resolver.resolve("mumblecore"), resolver.default_color());
    }

    #[test]
    fn test_director_names_are_matched_exactly() {
        // Lowercased director names are not in the genre table either.
        assert_eq!(ColorResolver::new().resolve("stanley kubrick"), DEFAULT_COLOR);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(hex(0x0a0b0c)), "#0a0b0c");
        assert_eq!(to_hex(Color::Red), "Red");
    }
}
