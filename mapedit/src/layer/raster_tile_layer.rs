//! Tiled raster basemap layer.

/// Index of a tile in a tile pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    /// Column of the tile.
    pub x: u64,
    /// Row of the tile.
    pub y: u64,
    /// Zoom level of the tile.
    pub z: u32,
}

impl TileIndex {
    /// Creates a new tile index.
    pub fn new(x: u64, y: u64, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// Raster layer that loads prerendered tiles from a url template.
///
/// The editor does not fetch or decode tiles itself; the layer only resolves tile urls for
/// the rendering side.
pub struct RasterTileLayer {
    name: String,
    url_template: String,
    layer_name: Option<String>,
    attribution: Option<String>,
}

impl RasterTileLayer {
    /// Creates a new raster tile layer.
    ///
    /// The template may contain `{x}`, `{y}`, `{z}` and `{layer}` placeholders.
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            layer_name: None,
            attribution: None,
        }
    }

    /// The OpenStreetMap basemap.
    pub fn osm() -> Self {
        Self::new("OpenStreetMap", "https://tile.openstreetmap.org/{z}/{x}/{y}.png")
            .with_attribution("© OpenStreetMap contributors")
    }

    /// The Esri World Imagery satellite basemap.
    pub fn esri_world_imagery() -> Self {
        Self::new(
            "Satellite",
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        )
        .with_attribution("Tiles © Esri")
    }

    /// Sets the value substituted for the `{layer}` placeholder. Used by WMTS services that
    /// serve several layers from one endpoint.
    pub fn with_layer_name(mut self, layer_name: impl Into<String>) -> Self {
        self.layer_name = Some(layer_name.into());
        self
    }

    /// Sets the attribution text of the layer.
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    /// Name of the layer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Url template the layer was created with.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Attribution text, if any.
    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }

    /// Resolves the url of the given tile.
    pub fn tile_url(&self, index: TileIndex) -> String {
        let mut url = self
            .url_template
            .replace("{x}", &index.x.to_string())
            .replace("{y}", &index.y.to_string())
            .replace("{z}", &index.z.to_string());
        if let Some(layer_name) = &self.layer_name {
            url = url.replace("{layer}", layer_name);
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osm_tile_url() {
        let layer = RasterTileLayer::osm();
        assert_eq!(
            layer.tile_url(TileIndex::new(4, 2, 3)),
            "https://tile.openstreetmap.org/3/4/2.png"
        );
    }

    #[test]
    fn esri_tile_url() {
        // note the {z}/{y}/{x} placeholder order of the arcgis scheme
        let layer = RasterTileLayer::esri_world_imagery();
        assert_eq!(
            layer.tile_url(TileIndex::new(4, 2, 3)),
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/3/2/4"
        );
    }

    #[test]
    fn wmts_layer_placeholder() {
        let layer = RasterTileLayer::new(
            "ortho",
            "https://example.com/wmts/{layer}/{z}/{x}/{y}.png",
        )
        .with_layer_name("orthophoto");
        assert_eq!(
            layer.tile_url(TileIndex::new(1, 2, 3)),
            "https://example.com/wmts/orthophoto/3/1/2.png"
        );
    }
}
