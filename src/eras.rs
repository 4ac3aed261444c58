// src/eras.rs
//
// Curated director groupings for the filter panel. A director outside every
// era is not offered as a grouped option; there is no catch-all group.

#[derive(Debug, Clone, Copy)]
pub struct Era {
    pub label: &'static str,
    pub directors: &'static [&'static str],
}

pub const ERAS: &[Era] = &[
    Era {
        label: "Golden Age",
        directors: &["Alfred Hitchcock", "Billy Wilder", "Akira Kurosawa"],
    },
    Era {
        label: "New Hollywood",
        directors: &[
            "Stanley Kubrick",
            "Sergio Leone",
            "Francis Ford Coppola",
            "Steven Spielberg",
            "John Carpenter",
            "Ridley Scott",
        ],
    },
    Era {
        label: "Blockbuster Era",
        directors: &["James Cameron", "David Lynch", "Martin Scorsese", "Coen Brothers"],
    },
    Era {
        label: "Indie Boom",
        directors: &[
            "Quentin Tarantino",
            "David Fincher",
            "Paul Thomas Anderson",
            "Wes Anderson",
        ],
    },
    Era {
        label: "Modern Auteurs",
        directors: &[
            "Christopher Nolan",
            "Guillermo del Toro",
            "Bong Joon-ho",
            "Denis Villeneuve",
            "Hayao Miyazaki",
        ],
    },
];

/// An era narrowed to the directors actually present in a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraGroup {
    pub label: &'static str,
    pub directors: Vec<&'static str>,
}

/// Keeps era order and in-era order; eras with no present director are omitted.
pub fn era_groups<S: AsRef<str>>(eras: &[Era], present_directors: &[S]) -> Vec<EraGroup> {
    eras.iter()
        .filter_map(|era| {
            let directors: Vec<&'static str> = era
                .directors
                .iter()
                .copied()
                .filter(|name| present_directors.iter().any(|p| p.as_ref() == *name))
                .collect();
            if directors.is_empty() {
                None
            } else {
                Some(EraGroup { label: era.label, directors })
            }
        })
        .collect()
}
