// src/core/brands.rs — Brand catalog and text highlighter
//
// Scans text left to right. At each position the first catalog name (in
// declaration order) that matches case-insensitively wins, and scanning
// resumes after it. Segments borrow from the input, so joining them
// reproduces it exactly.

/// Brand names recognized out of the box, in match-priority order.
pub const DEFAULT_BRANDS: &[&str] = &[
    "Nike",
    "Essentials",
    "Fear of God",
    "Adidas",
    "Puma",
    "Zara",
    "H&M",
    "Uniqlo",
    "Gucci",
    "Prada",
    "Louis Vuitton",
    "Dior",
    "Balenciaga",
    "Jordan",
    "Converse",
    "Vans",
    "New Balance",
    "Asics",
    "Reebok",
    "The North Face",
    "Champion",
    "Levi's",
    "Calvin Klein",
    "Tommy Hilfiger",
    "Ralph Lauren",
    "Lacoste",
    "Stussy",
    "Supreme",
    "Off-White",
    "Palm Angels",
    "Vetements",
    "Chrome Hearts",
];

/// A run of text that is either plain or a brand occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Brand(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(s) | Segment::Brand(s) => s,
        }
    }

    pub fn is_brand(&self) -> bool {
        matches!(self, Segment::Brand(_))
    }
}

/// Ordered set of brand names used for display emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandCatalog {
    names: Vec<String>,
}

impl Default for BrandCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_BRANDS.iter().copied())
    }
}

impl BrandCatalog {
    /// Build a catalog. Blank names and case-insensitive duplicates are dropped;
    /// the first spelling of a name is kept.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self { names: Vec::new() };
        catalog.extend(names);
        catalog
    }

    /// The built-in catalog followed by `extra`.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        catalog.extend(extra);
        catalog
    }

    fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                continue;
            }
            if !self.names.iter().any(|existing| same_name(existing, &name)) {
                self.names.push(name);
            }
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Split `text` into plain and brand segments.
    ///
    /// Text without any match (including the empty string) comes back as a
    /// single plain segment.
    pub fn highlight<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut plain_start = 0;

        for (start, end, _) in self.scan(text) {
            if start > plain_start {
                segments.push(Segment::Plain(&text[plain_start..start]));
            }
            segments.push(Segment::Brand(&text[start..end]));
            plain_start = end;
        }

        if plain_start < text.len() || segments.is_empty() {
            segments.push(Segment::Plain(&text[plain_start..]));
        }
        segments
    }

    /// Distinct catalog names occurring in `text`, in order of first occurrence.
    pub fn brands_in(&self, text: &str) -> Vec<&str> {
        let mut found: Vec<&str> = Vec::new();
        for (_, _, index) in self.scan(text) {
            let name = self.names[index].as_str();
            if !found.contains(&name) {
                found.push(name);
            }
        }
        found
    }

    /// Non-overlapping matches as `(start, end, catalog index)` byte ranges.
    fn scan(&self, text: &str) -> Vec<(usize, usize, usize)> {
        let mut matches = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];
            let hit = self
                .names
                .iter()
                .enumerate()
                .find_map(|(index, name)| match_len(rest, name).map(|len| (len, index)));

            match hit {
                Some((len, index)) => {
                    matches.push((pos, pos + len, index));
                    pos += len;
                }
                None => {
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        matches
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count() && match_len(a, b).is_some()
}

/// Byte length of the prefix of `haystack` that equals `needle` ignoring case.
fn match_len(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for n in needle.chars() {
        let (_, h) = hay.next()?;
        if !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(i, _)| i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn joined(segments: &[Segment<'_>]) -> String {
        segments.iter().map(Segment::text).collect()
    }

    #[test]
    fn test_default_catalog_order() {
        let catalog = BrandCatalog::default();
        assert_eq!(catalog.len(), 32);
        assert_eq!(catalog.names()[0], "Nike");
        assert_eq!(catalog.names()[31], "Chrome Hearts");
    }

    #[test]
    fn test_highlight_breakdown_fields() {
        let catalog = BrandCatalog::default();
        assert_eq!(
            catalog.highlight("White Essentials hoodie"),
            vec![
                Segment::Plain("White "),
                Segment::Brand("Essentials"),
                Segment::Plain(" hoodie"),
            ]
        );
        assert_eq!(
            catalog.highlight("Black Nike leggings"),
            vec![
                Segment::Plain("Black "),
                Segment::Brand("Nike"),
                Segment::Plain(" leggings"),
            ]
        );
    }

    #[test]
    fn test_mixed_case_is_matched_and_preserved() {
        let catalog = BrandCatalog::default();
        let segments = catalog.highlight("nikE air");
        assert_eq!(segments[0], Segment::Brand("nikE"));
        assert_eq!(joined(&segments), "nikE air");
    }

    #[test]
    fn test_no_match_single_plain_segment() {
        let catalog = BrandCatalog::default();
        assert_eq!(
            catalog.highlight("plain cotton tee"),
            vec![Segment::Plain("plain cotton tee")]
        );
    }

    #[test]
    fn test_empty_text_unchanged() {
        let catalog = BrandCatalog::default();
        assert_eq!(catalog.highlight(""), vec![Segment::Plain("")]);
    }

    #[test]
    fn test_substring_matches_count() {
        let catalog = BrandCatalog::default();
        // "Vans" inside "caravans"
        let segments = catalog.highlight("caravans");
        assert_eq!(
            segments,
            vec![Segment::Plain("cara"), Segment::Brand("vans")]
        );
    }

    #[test]
    fn test_adjacent_brands() {
        let catalog = BrandCatalog::default();
        assert_eq!(
            catalog.highlight("NikeAdidas"),
            vec![Segment::Brand("Nike"), Segment::Brand("Adidas")]
        );
    }

    #[test]
    fn test_catalog_order_wins_at_same_position() {
        let short_first = BrandCatalog::new(["Off", "Off-White"]);
        assert_eq!(
            short_first.highlight("Off-White belt"),
            vec![Segment::Brand("Off"), Segment::Plain("-White belt")]
        );

        let long_first = BrandCatalog::new(["Off-White", "Off"]);
        assert_eq!(
            long_first.highlight("Off-White belt"),
            vec![Segment::Brand("Off-White"), Segment::Plain(" belt")]
        );
    }

    #[test]
    fn test_no_overlap_after_match() {
        // "ora" overlaps the "Dior" match and is not reported
        let catalog = BrandCatalog::new(["Dior", "ora"]);
        assert_eq!(
            catalog.highlight("Diorama"),
            vec![Segment::Brand("Dior"), Segment::Plain("ama")]
        );
    }

    #[test]
    fn test_special_characters_literal() {
        let catalog = BrandCatalog::default();
        assert_eq!(
            catalog.highlight("h&m and LEVI'S"),
            vec![
                Segment::Brand("h&m"),
                Segment::Plain(" and "),
                Segment::Brand("LEVI'S"),
            ]
        );
    }

    #[test]
    fn test_multibyte_text_round_trips() {
        let catalog = BrandCatalog::default();
        let text = "Jaket Zara — warna krem, sepatu ASICS 日本";
        let segments = catalog.highlight(text);
        assert_eq!(joined(&segments), text);
        assert_eq!(
            segments.iter().filter(|s| s.is_brand()).count(),
            2,
            "{segments:?}"
        );
    }

    #[test]
    fn test_non_ascii_brand_name() {
        let catalog = BrandCatalog::new(["Émile"]);
        assert_eq!(
            catalog.highlight("by ÉMILE"),
            vec![Segment::Plain("by "), Segment::Brand("ÉMILE")]
        );
    }

    #[test]
    fn test_brands_in_first_occurrence_order() {
        let catalog = BrandCatalog::default();
        assert_eq!(
            catalog.brands_in("Nike socks, Gucci belt, nike cap"),
            vec!["Nike", "Gucci"]
        );
        assert!(catalog.brands_in("no labels").is_empty());
    }

    #[test]
    fn test_new_drops_blank_and_duplicate_names() {
        let catalog = BrandCatalog::new(["Nike", "", "  ", "NIKE", "Puma"]);
        assert_eq!(catalog.names(), &["Nike".to_string(), "Puma".to_string()]);
    }

    #[test]
    fn test_with_extra_appends_after_defaults() {
        let catalog = BrandCatalog::with_extra(["Carhartt", "nike"]);
        assert_eq!(catalog.len(), 33);
        assert_eq!(catalog.names()[32], "Carhartt");
    }

    #[test]
    fn test_match_len() {
        assert_eq!(match_len("NIKE air", "nike"), Some(4));
        assert_eq!(match_len("Nik", "nike"), None);
        assert_eq!(match_len("ÉMILE!", "émile"), Some(6));
    }
}
