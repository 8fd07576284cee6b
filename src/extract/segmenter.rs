use std::collections::HashMap;

/// The fenced-code delimiter line.
pub const FENCE: &str = "```";

/// Canonical non-code sections recognized in upstream replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Logic,
    TimeComplexity,
    SpaceComplexity,
    Improvements,
}

impl Section {
    /// All sections, in the order they are reconciled.
    pub const ALL: [Section; 4] = [
        Section::Logic,
        Section::TimeComplexity,
        Section::SpaceComplexity,
        Section::Improvements,
    ];

    /// Canonical field name, as it appears in the emitted bundle.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Logic => "Logic",
            Section::TimeComplexity => "Time_Complexity",
            Section::SpaceComplexity => "Space_Complexity",
            Section::Improvements => "Improvements",
        }
    }

    /// The marker literal that opens this section in upstream text.
    pub fn marker(&self) -> &'static str {
        match self {
            Section::Logic => "**Logic:**",
            Section::TimeComplexity => "**Time Complexity:**",
            Section::SpaceComplexity => "**Space Complexity:**",
            Section::Improvements => "**Improvements/Alternatives:**",
        }
    }

    /// Looks up the section whose marker equals the given trimmed line.
    fn from_marker(line: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.marker() == line)
    }
}

/// What the scanner is currently accumulating into.
#[derive(Clone, Copy)]
enum Active {
    None,
    Code,
    Section(Section),
}

/// Splits a raw reply into a mapping of section name -> accumulated text.
///
/// A trimmed line equal to a marker literal switches the active section; a
/// trimmed line equal to the bare fence toggles code mode (code lines are
/// consumed here only so they do not leak into the surrounding section — the
/// code itself is collected by the separate pass in `code_blocks`). Marker
/// lines are never recorded, and lines seen before the first marker are
/// discarded. A marker occurring mid-sentence is not recognized: the match is
/// against the entire trimmed line. An odd number of fences leaves code mode
/// on for the rest of the scan; that is accepted, not corrected.
pub fn segment(reply: &str) -> HashMap<Section, String> {
    let mut accumulated: HashMap<Section, Vec<&str>> =
        Section::ALL.into_iter().map(|s| (s, Vec::new())).collect();

    let mut active = Active::None;
    let mut in_code = false;

    for line in reply.lines() {
        let trimmed = line.trim();

        if trimmed == FENCE {
            in_code = !in_code;
            active = if in_code { Active::Code } else { Active::None };
            continue;
        }

        if let Some(section) = Section::from_marker(trimmed) {
            active = Active::Section(section);
            continue;
        }

        if let Active::Section(section) = active {
            if let Some(lines) = accumulated.get_mut(&section) {
                // Untrimmed: indentation inside a section is meaningful.
                lines.push(line);
            }
        }
    }

    accumulated
        .into_iter()
        .map(|(section, lines)| (section, lines.join("\n")))
        .collect()
}
