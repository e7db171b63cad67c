//! Base map tile servers and their caches

use crate::app::state::TilesProvider;
use walkers::{
    HttpTiles, TileId,
    sources::{Attribution, OpenStreetMap, TileSource},
};

/// Spread requests over a server's subdomains, keyed on the tile position
fn subdomain(tile_id: TileId, subdomains: &[&'static str]) -> &'static str {
    let key = tile_id.x as usize + tile_id.y as usize;
    subdomains[key % subdomains.len()]
}

/// CARTO's light basemap, rendered from OpenStreetMap data
pub struct CartoPositron;

impl TileSource for CartoPositron {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://{}.basemaps.cartocdn.com/light_all/{}/{}/{}.png",
            subdomain(tile_id, &["a", "b", "c", "d"]),
            tile_id.zoom,
            tile_id.x,
            tile_id.y
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© OpenStreetMap contributors © CARTO",
            url: "https://carto.com/attributions",
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        20
    }
}

/// Topographic map; the servers stop at zoom 17
pub struct OpenTopoMap;

impl TileSource for OpenTopoMap {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://{}.tile.opentopomap.org/{}/{}/{}.png",
            subdomain(tile_id, &["a", "b", "c"]),
            tile_id.zoom,
            tile_id.x,
            tile_id.y
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© OpenTopoMap (CC-BY-SA)",
            url: "https://opentopomap.org/",
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        17
    }
}

impl TilesProvider {
    /// Credit line of the provider's tile source
    pub fn attribution(&self) -> Attribution {
        match self {
            Self::CartoPositron => CartoPositron.attribution(),
            Self::OpenStreetMap => OpenStreetMap.attribution(),
            Self::OpenTopoMap => OpenTopoMap.attribution(),
        }
    }
}

/// One tile cache per provider, so switching back does not refetch
pub struct BaseMaps {
    carto: HttpTiles,
    osm: HttpTiles,
    topo: HttpTiles,
}

impl BaseMaps {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            carto: HttpTiles::new(CartoPositron, ctx.clone()),
            osm: HttpTiles::new(OpenStreetMap, ctx.clone()),
            topo: HttpTiles::new(OpenTopoMap, ctx.clone()),
        }
    }

    pub fn get_mut(&mut self, provider: TilesProvider) -> &mut HttpTiles {
        match provider {
            TilesProvider::CartoPositron => &mut self.carto,
            TilesProvider::OpenStreetMap => &mut self.osm,
            TilesProvider::OpenTopoMap => &mut self.topo,
        }
    }
}
