/// How a rendered layer is drawn, as simplestyle properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub color: String,
    pub weight: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    /// Attributes shown when hovering a line, where a row has them.
    pub tooltip: Vec<String>,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            color: "red".to_string(),
            weight: 2.0,
            fill_color: "#3388ff".to_string(),
            fill_opacity: 0.8,
            tooltip: ["road_street_name", "LOCAL GOVERNMENT", "distance(m)"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Style {
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_tooltip<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tooltip = fields.into_iter().map(Into::into).collect();
        self
    }
}
