//! Built-in texture table.
//!
//! Planet maps come from `threex.planets`, moon maps are 600px Wikimedia
//! Commons thumbnails. Order is download order.

use serde::{Deserialize, Serialize};

/// One file to download: target file name and its source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// File name inside the target directory.
    pub name: String,
    /// Source URL (http or https).
    pub url: String,
}

impl AssetEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

const BUILTIN: &[(&str, &str)] = &[
    (
        "sun.jpg",
        "https://raw.githubusercontent.com/turban/webgl-earth/master/images/sun.jpg",
    ),
    (
        "sun_real.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/9/99/Map_of_the_full_sun.jpg",
    ),
    (
        "mercurymap.jpg",
        "https://raw.githubusercontent.com/jeromeetienne/threex.planets/master/images/mercurymap.jpg",
    ),
    (
        "venusmap.jpg",
        "https://raw.githubusercontent.com/jeromeetienne/threex.planets/master/images/venusmap.jpg",
    ),
    (
        "earthmap1k.jpg",
        "https://raw.githubusercontent.com/jeromeetienne/threex.planets/master/images/earthmap1k.jpg",
    ),
    (
        "moonmap1k.jpg",
        "https://raw.githubusercontent.com/jeromeetienne/threex.planets/master/images/moonmap1k.jpg",
    ),
    (
        "marsmap1k.jpg",
        "https://raw.githubusercontent.com/jeromeetienne/threex.planets/master/images/marsmap1k.jpg",
    ),
    (
        "jupitermap.jpg",
        "https://raw.githubusercontent.com/jeromeetienne/threex.planets/master/images/jupitermap.jpg",
    ),
    (
        "saturnmap.jpg",
        "https://raw.githubusercontent.com/jeromeetienne/threex.planets/master/images/saturnmap.jpg",
    ),
    (
        "uranusmap.jpg",
        "https://raw.githubusercontent.com/jeromeetienne/threex.planets/master/images/uranusmap.jpg",
    ),
    (
        "neptunemap.jpg",
        "https://raw.githubusercontent.com/jeromeetienne/threex.planets/master/images/neptunemap.jpg",
    ),
    (
        "io.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/7/7b/Io_highest_resolution_true_color.jpg/600px-Io_highest_resolution_true_color.jpg",
    ),
    (
        "europa.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/e/e4/Europa-moon-with-margins.jpg/600px-Europa-moon-with-margins.jpg",
    ),
    (
        "ganymede.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/2/21/Ganymede_g1_true-edit1.jpg/600px-Ganymede_g1_true-edit1.jpg",
    ),
    (
        "callisto.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/e/e9/Callisto.jpg/600px-Callisto.jpg",
    ),
    (
        "titan.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/8/84/Titan_in_true_color.jpg/600px-Titan_in_true_color.jpg",
    ),
    (
        "enceladus.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/8/83/Enceladus_from_Voyager.jpg/600px-Enceladus_from_Voyager.jpg",
    ),
    (
        "mimas.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/b/bc/Mimas_Cassini.jpg/600px-Mimas_Cassini.jpg",
    ),
    (
        "phobos.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/5/5c/Phobos_colour_2008.jpg/600px-Phobos_colour_2008.jpg",
    ),
    (
        "deimos.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/8/8d/Deimos-MRO.jpg/600px-Deimos-MRO.jpg",
    ),
    (
        "titania.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/2/2f/Titania_%28moon%29_color%2C_edited.jpg/600px-Titania_%28moon%29_color%2C_edited.jpg",
    ),
    (
        "oberon.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/e/e0/Oberon_USGS.jpg/600px-Oberon_USGS.jpg",
    ),
    (
        "triton.jpg",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a6/Triton_moon_mosaic_Voyager_2_%28large%29.jpg/600px-Triton_moon_mosaic_Voyager_2_%28large%29.jpg",
    ),
];

/// The default texture table, in download order.
pub fn builtin_assets() -> Vec<AssetEntry> {
    BUILTIN
        .iter()
        .map(|(name, url)| AssetEntry::new(*name, *url))
        .collect()
}
