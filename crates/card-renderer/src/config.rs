use card_object_model::{
    CardEnum, ContainerStyle, ImageSize, Spacing, TextColor, TextSize, TextWeight,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Host-supplied styling and capability settings.
///
/// Every field has a default so a host config document only needs to carry
/// the values it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default)]
    pub font_sizes: FontSizesConfig,
    #[serde(default)]
    pub font_weights: FontWeightsConfig,
    #[serde(default)]
    pub spacing: SpacingConfig,
    #[serde(default)]
    pub separator: SeparatorConfig,
    #[serde(default)]
    pub container_styles: ContainerStylesConfig,
    #[serde(default)]
    pub image_sizes: ImageSizesConfig,
    #[serde(default)]
    pub image_set: ImageSetConfig,
    #[serde(default)]
    pub actions: ActionsConfig,
    #[serde(default = "default_true")]
    pub supports_interactivity: bool,
}

fn default_font_family() -> String {
    "Segoe UI".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_sizes: FontSizesConfig::default(),
            font_weights: FontWeightsConfig::default(),
            spacing: SpacingConfig::default(),
            separator: SeparatorConfig::default(),
            container_styles: ContainerStylesConfig::default(),
            image_sizes: ImageSizesConfig::default(),
            image_set: ImageSetConfig::default(),
            actions: ActionsConfig::default(),
            supports_interactivity: true,
        }
    }
}

impl HostConfig {
    /// Parses and validates a host config document.
    pub fn from_json_str(json: &str) -> Result<Self, HostConfigError> {
        let config: HostConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HostConfigError> {
        if self.font_family.trim().is_empty() {
            return Err(HostConfigError::Empty {
                field: "fontFamily".to_string(),
            });
        }
        let positive = [
            ("fontSizes.small", self.font_sizes.small),
            ("fontSizes.default", self.font_sizes.default),
            ("fontSizes.medium", self.font_sizes.medium),
            ("fontSizes.large", self.font_sizes.large),
            ("fontSizes.extraLarge", self.font_sizes.extra_large),
            ("imageSizes.small", self.image_sizes.small),
            ("imageSizes.medium", self.image_sizes.medium),
            ("imageSizes.large", self.image_sizes.large),
            ("imageSet.maxImageHeight", self.image_set.max_image_height),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(HostConfigError::Zero {
                    field: field.to_string(),
                });
            }
        }
        check_color("separator.lineColor", &self.separator.line_color)?;
        for (name, style) in [
            ("default", &self.container_styles.default),
            ("emphasis", &self.container_styles.emphasis),
        ] {
            check_color(
                &format!("containerStyles.{name}.backgroundColor"),
                &style.background_color,
            )?;
            for &color in TextColor::ALL {
                let pair = style.foreground_colors.get(color);
                let prefix = format!("containerStyles.{name}.foregroundColors.{color}");
                check_color(&format!("{prefix}.default"), &pair.default)?;
                check_color(&format!("{prefix}.subtle"), &pair.subtle)?;
            }
        }
        Ok(())
    }

    pub fn font_size(&self, size: TextSize) -> u32 {
        let sizes = &self.font_sizes;
        match size {
            TextSize::Small => sizes.small,
            TextSize::Default => sizes.default,
            TextSize::Medium => sizes.medium,
            TextSize::Large => sizes.large,
            TextSize::ExtraLarge => sizes.extra_large,
        }
    }

    pub fn font_weight(&self, weight: TextWeight) -> u32 {
        let weights = &self.font_weights;
        match weight {
            TextWeight::Lighter => weights.lighter,
            TextWeight::Default => weights.default,
            TextWeight::Bolder => weights.bolder,
        }
    }

    /// Pixels of vertical gap for a spacing value.
    pub fn spacing(&self, spacing: Spacing) -> u32 {
        let config = &self.spacing;
        match spacing {
            Spacing::None => 0,
            Spacing::Small => config.small,
            Spacing::Default => config.default,
            Spacing::Medium => config.medium,
            Spacing::Large => config.large,
            Spacing::ExtraLarge => config.extra_large,
            Spacing::Padding => config.padding,
        }
    }

    /// Explicit pixel width for an image size, `None` for `auto` and `stretch`.
    pub fn image_size(&self, size: ImageSize) -> Option<u32> {
        match size {
            ImageSize::Small => Some(self.image_sizes.small),
            ImageSize::Medium => Some(self.image_sizes.medium),
            ImageSize::Large => Some(self.image_sizes.large),
            ImageSize::Auto | ImageSize::Stretch => None,
        }
    }

    pub fn container_style(&self, style: ContainerStyle) -> &ContainerStyleConfig {
        match style {
            ContainerStyle::Default => &self.container_styles.default,
            ContainerStyle::Emphasis => &self.container_styles.emphasis,
        }
    }
}

fn check_color(field: &str, value: &str) -> Result<(), HostConfigError> {
    let hex = value.strip_prefix('#').unwrap_or("");
    let valid = matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(HostConfigError::InvalidColor {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FontSizesConfig {
    pub small: u32,
    pub default: u32,
    pub medium: u32,
    pub large: u32,
    pub extra_large: u32,
}

impl Default for FontSizesConfig {
    fn default() -> Self {
        Self {
            small: 12,
            default: 14,
            medium: 17,
            large: 21,
            extra_large: 26,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FontWeightsConfig {
    pub lighter: u32,
    pub default: u32,
    pub bolder: u32,
}

impl Default for FontWeightsConfig {
    fn default() -> Self {
        Self {
            lighter: 200,
            default: 400,
            bolder: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacingConfig {
    pub small: u32,
    pub default: u32,
    pub medium: u32,
    pub large: u32,
    pub extra_large: u32,
    pub padding: u32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            small: 3,
            default: 8,
            medium: 20,
            large: 30,
            extra_large: 40,
            padding: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SeparatorConfig {
    pub line_thickness: u32,
    pub line_color: String,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            line_thickness: 1,
            line_color: "#B2000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStylesConfig {
    #[serde(default)]
    pub default: ContainerStyleConfig,
    #[serde(default = "ContainerStyleConfig::emphasis")]
    pub emphasis: ContainerStyleConfig,
}

impl Default for ContainerStylesConfig {
    fn default() -> Self {
        Self {
            default: ContainerStyleConfig::default(),
            emphasis: ContainerStyleConfig::emphasis(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerStyleConfig {
    pub background_color: String,
    pub foreground_colors: ForegroundColorsConfig,
}

impl Default for ContainerStyleConfig {
    fn default() -> Self {
        Self {
            background_color: "#FFFFFFFF".to_string(),
            foreground_colors: ForegroundColorsConfig::default(),
        }
    }
}

impl ContainerStyleConfig {
    fn emphasis() -> Self {
        Self {
            background_color: "#08000000".to_string(),
            foreground_colors: ForegroundColorsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ForegroundColorsConfig {
    pub default: ColorConfig,
    pub dark: ColorConfig,
    pub light: ColorConfig,
    pub accent: ColorConfig,
    pub good: ColorConfig,
    pub warning: ColorConfig,
    pub attention: ColorConfig,
}

impl Default for ForegroundColorsConfig {
    fn default() -> Self {
        Self {
            default: ColorConfig::new("#FF000000", "#B2000000"),
            dark: ColorConfig::new("#FF101010", "#B2101010"),
            light: ColorConfig::new("#FFFFFFFF", "#B2FFFFFF"),
            accent: ColorConfig::new("#FF0000FF", "#B20000FF"),
            good: ColorConfig::new("#FF008000", "#B2008000"),
            warning: ColorConfig::new("#FFFFD700", "#B2FFD700"),
            attention: ColorConfig::new("#FF8B0000", "#B28B0000"),
        }
    }
}

impl ForegroundColorsConfig {
    pub fn get(&self, color: TextColor) -> &ColorConfig {
        match color {
            TextColor::Default => &self.default,
            TextColor::Dark => &self.dark,
            TextColor::Light => &self.light,
            TextColor::Accent => &self.accent,
            TextColor::Good => &self.good,
            TextColor::Warning => &self.warning,
            TextColor::Attention => &self.attention,
        }
    }
}

/// A color and its subtle variant, as `#AARRGGBB` or `#RRGGBB`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColorConfig {
    pub default: String,
    pub subtle: String,
}

impl ColorConfig {
    pub fn new(default: impl Into<String>, subtle: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            subtle: subtle.into(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig::new("#FF000000", "#B2000000")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSizesConfig {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl Default for ImageSizesConfig {
    fn default() -> Self {
        Self {
            small: 40,
            medium: 80,
            large: 160,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSetConfig {
    /// Size used for images of a set whose own `imageSize` is `auto`.
    pub image_size: ImageSize,
    pub max_image_height: u32,
}

impl Default for ImageSetConfig {
    fn default() -> Self {
        Self {
            image_size: ImageSize::Medium,
            max_image_height: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionsConfig {
    pub max_actions: u32,
    pub button_spacing: u32,
    pub show_card: ShowCardConfig,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            max_actions: 5,
            button_spacing: 10,
            show_card: ShowCardConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowCardConfig {
    pub action_mode: ShowCardActionMode,
    /// Container style the nested card is rendered with.
    pub style: ContainerStyle,
    pub inline_top_margin: u32,
}

impl Default for ShowCardConfig {
    fn default() -> Self {
        Self {
            action_mode: ShowCardActionMode::Inline,
            style: ContainerStyle::Emphasis,
            inline_top_margin: 16,
        }
    }
}

/// Where `Action.ShowCard` places its card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ShowCardActionMode {
    /// Collapsed panel below the action bar, expanded by the button.
    #[default]
    Inline,
    /// Flyout anchored to the button.
    Popup,
}

#[derive(Debug, Error)]
pub enum HostConfigError {
    #[error("invalid host config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("host config field `{field}` must not be empty")]
    Empty { field: String },
    #[error("host config field `{field}` must be greater than zero")]
    Zero { field: String },
    #[error("host config field `{field}` has invalid color `{value}`")]
    InvalidColor { field: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip_defaults() {
        let config = HostConfig::default();
        let json = serde_json::to_string(&config).expect("serialize");
        let parsed = HostConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = HostConfig::from_json_str(
            r##"{
                "supportsInteractivity": false,
                "fontSizes": {"large": 30},
                "actions": {"maxActions": 2, "showCard": {"actionMode": "popup"}},
                "imageSet": {"imageSize": "Small"}
            }"##,
        )
        .expect("parse");
        assert!(!config.supports_interactivity);
        assert_eq!(config.font_sizes.large, 30);
        assert_eq!(config.font_sizes.small, 12);
        assert_eq!(config.actions.max_actions, 2);
        assert_eq!(config.actions.button_spacing, 10);
        assert_eq!(config.actions.show_card.action_mode, ShowCardActionMode::Popup);
        assert_eq!(config.image_set.image_size, ImageSize::Small);
        assert_eq!(config.container_styles.emphasis.background_color, "#08000000");
    }

    #[test]
    fn rejects_zero_sizes_and_bad_colors() {
        let err = HostConfig::from_json_str(r#"{"imageSizes": {"small": 0}}"#).unwrap_err();
        assert!(matches!(err, HostConfigError::Zero { ref field } if field == "imageSizes.small"));

        let err = HostConfig::from_json_str(r#"{"separator": {"lineColor": "grey"}}"#).unwrap_err();
        assert!(matches!(err, HostConfigError::InvalidColor { .. }));

        let err = HostConfig::from_json_str("[]").unwrap_err();
        assert!(matches!(err, HostConfigError::Json(_)));
    }

    #[test]
    fn resolves_style_values() {
        let config = HostConfig::default();
        assert_eq!(config.spacing(Spacing::None), 0);
        assert_eq!(config.spacing(Spacing::Medium), 20);
        assert_eq!(config.font_size(TextSize::ExtraLarge), 26);
        assert_eq!(config.font_weight(TextWeight::Bolder), 600);
        assert_eq!(config.image_size(ImageSize::Large), Some(160));
        assert_eq!(config.image_size(ImageSize::Stretch), None);
        assert_eq!(
            config
                .container_style(ContainerStyle::Default)
                .foreground_colors
                .get(TextColor::Accent)
                .subtle,
            "#B20000FF"
        );
    }
}
