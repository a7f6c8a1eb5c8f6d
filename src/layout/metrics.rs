//! Title metrics resolution.
//!
//! Produces the expanded (large) and collapsed (compact) title layouts plus
//! the compact bar slots for one header configuration. The result is cached
//! and reused until an input that affects geometry changes; colors, direction
//! and alignment do not invalidate it.

use std::rc::Rc;

use tracing::debug;

use crate::config::HeaderConfig;
use crate::error::LayoutError;
use crate::types::{FontWeight, Insets, Size, TitleStyle};

use super::taffy_bridge::{BarLayout, compute_bar_layout};
use super::text_measure::{
    EstimatingMeasurer, LINE_HEIGHT_FACTOR, OverflowPolicy, TextBox, TextMeasurer,
};
use super::{BACK_CHEVRON_WIDTH, BACK_LABEL_GAP, LARGE_TITLE_INSET};

/// One title string laid out under one style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TitleLayout {
    pub width: f32,
    pub height: f32,
    /// From the top of the box to the first baseline.
    pub baseline: f32,
    pub lines: Vec<String>,
    pub truncated: bool,
    pub font_size: f32,
}

impl TitleLayout {
    fn from_box(text_box: TextBox, style: &TitleStyle) -> Self {
        Self {
            width: text_box.size.width,
            height: text_box.size.height,
            baseline: text_box.baseline,
            lines: text_box.lines,
            truncated: text_box.truncated,
            font_size: style.font_size,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Everything geometric the controller and renderer need.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMetrics {
    pub expanded: TitleLayout,
    pub collapsed: TitleLayout,
    pub bar: BarLayout,
    /// Back label as laid out next to the chevron.
    pub back_label: Option<TitleLayout>,
}

/// Inputs that change geometry.
#[derive(Debug, Clone, PartialEq)]
struct MetricsKey {
    title: String,
    large_style: TitleStyle,
    compact_style: TitleStyle,
    header_width: f32,
    large_title: bool,
    overflow: OverflowPolicy,
    back_button: Option<Option<String>>,
}

impl MetricsKey {
    fn of(config: &HeaderConfig) -> Self {
        Self {
            title: config.title_text.clone(),
            large_style: config.large_style.clone(),
            compact_style: config.compact_style.clone(),
            header_width: config.header_width,
            large_title: config.large_title,
            overflow: config.large_title_overflow,
            back_button: config.back_button.as_ref().map(|b| b.label.clone()),
        }
    }
}

/// Memoizing resolver for [`HeaderMetrics`].
pub struct TitleMetricsResolver {
    measurer: Rc<dyn TextMeasurer>,
    cached: Option<(MetricsKey, Rc<HeaderMetrics>)>,
    computations: u64,
}

impl Default for TitleMetricsResolver {
    fn default() -> Self {
        Self::new(Rc::new(EstimatingMeasurer))
    }
}

impl TitleMetricsResolver {
    pub fn new(measurer: Rc<dyn TextMeasurer>) -> Self {
        Self {
            measurer,
            cached: None,
            computations: 0,
        }
    }

    pub fn measurer(&self) -> Rc<dyn TextMeasurer> {
        self.measurer.clone()
    }

    /// How many times metrics were actually computed (cache misses).
    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// Resolve metrics for `config`, reusing the cached result when nothing
    /// geometric changed.
    ///
    /// Fails with [`LayoutError::NonPositiveWidth`] for a zero, negative or
    /// non-finite header width.
    pub fn resolve(&mut self, config: &HeaderConfig) -> Result<Rc<HeaderMetrics>, LayoutError> {
        let width = config.header_width;
        if !(width.is_finite() && width > 0.0) {
            return Err(LayoutError::NonPositiveWidth { width });
        }

        let key = MetricsKey::of(config);
        if let Some((cached_key, metrics)) = &self.cached {
            if *cached_key == key {
                return Ok(metrics.clone());
            }
        }

        let metrics = Rc::new(self.compute(config)?);
        self.computations += 1;
        debug!(
            title = %config.title_text,
            width,
            expanded_height = metrics.expanded.height,
            collapsed_height = metrics.collapsed.height,
            "resolved title metrics"
        );

        self.cached = Some((key, metrics.clone()));
        Ok(metrics)
    }

    fn compute(&self, config: &HeaderConfig) -> Result<HeaderMetrics, LayoutError> {
        let width = config.header_width;

        let back_style = TitleStyle {
            font_weight: FontWeight::REGULAR,
            ..config.compact_style.clone()
        };
        let back_label = match &config.back_button {
            Some(back) => match back.label.as_deref().filter(|l| !l.is_empty()) {
                Some(label) => Some(self.layout(
                    label,
                    &back_style,
                    width / 3.0,
                    OverflowPolicy::Truncate,
                )?),
                None => None,
            },
            None => None,
        };

        let back_size = config.back_button.as_ref().map(|_| {
            let line_height = LINE_HEIGHT_FACTOR * back_style.font_size;
            match &back_label {
                Some(label) => Size::new(
                    BACK_CHEVRON_WIDTH + BACK_LABEL_GAP + label.width,
                    label.height.max(line_height),
                ),
                None => Size::new(BACK_CHEVRON_WIDTH, line_height),
            }
        });

        let bar = compute_bar_layout(width, back_size)?;

        let collapsed = self.layout(
            &config.title_text,
            &config.compact_style,
            bar.title_slot.width,
            OverflowPolicy::Truncate,
        )?;

        // Without the large-title feature both layouts are the compact one.
        let expanded = if config.large_title {
            let margins = Insets::horizontal(LARGE_TITLE_INSET);
            self.layout(
                &config.title_text,
                &config.large_style,
                width - margins.left - margins.right,
                config.large_title_overflow,
            )?
        } else {
            collapsed.clone()
        };

        Ok(HeaderMetrics {
            expanded,
            collapsed,
            bar,
            back_label,
        })
    }

    fn layout(
        &self,
        text: &str,
        style: &TitleStyle,
        max_width: f32,
        overflow: OverflowPolicy,
    ) -> Result<TitleLayout, LayoutError> {
        let text_box = self.measurer.measure(text, style, max_width.max(0.0), overflow);

        let finite = text_box.size.width.is_finite()
            && text_box.size.height.is_finite()
            && text_box.baseline.is_finite();
        if !finite || text_box.size.width < 0.0 || text_box.size.height < 0.0 {
            return Err(LayoutError::UnresolvableMetrics {
                text: text.to_string(),
                reason: format!("measurer returned {:?}", text_box.size),
            });
        }

        Ok(TitleLayout::from_box(text_box, style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackButton, HeaderConfig};
    use crate::direction::Direction;
    use crate::types::Rgba;

    struct BrokenMeasurer;

    impl TextMeasurer for BrokenMeasurer {
        fn measure(&self, _: &str, _: &TitleStyle, _: f32, _: OverflowPolicy) -> TextBox {
            TextBox {
                size: Size::new(f32::NAN, 10.0),
                ..Default::default()
            }
        }
    }

    fn config() -> HeaderConfig {
        HeaderConfig::new("RTL Large Title Test", 390.0)
    }

    #[test]
    fn test_rejects_non_positive_width() {
        let mut resolver = TitleMetricsResolver::default();
        for width in [0.0, -1.0, f32::NAN] {
            let err = resolver.resolve(&config().with_width(width)).unwrap_err();
            assert!(matches!(err, LayoutError::NonPositiveWidth { .. }));
        }
        assert_eq!(resolver.computations(), 0);
    }

    #[test]
    fn test_expanded_taller_than_collapsed() {
        let mut resolver = TitleMetricsResolver::default();
        let metrics = resolver.resolve(&config()).unwrap();
        assert!(metrics.expanded.height > metrics.collapsed.height);
        assert_eq!(metrics.expanded.font_size, 34.0);
        assert_eq!(metrics.collapsed.font_size, 17.0);
    }

    #[test]
    fn test_memoized_until_geometry_changes() {
        let mut resolver = TitleMetricsResolver::default();
        let first = resolver.resolve(&config()).unwrap();

        // Color and direction do not affect geometry
        let recolored = config()
            .with_direction(Direction::Rtl)
            .with_tint_color(Rgba::BLACK);
        let second = resolver.resolve(&recolored).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(resolver.computations(), 1);

        let retitled = config().with_title("عنوان");
        let third = resolver.resolve(&retitled).unwrap();
        assert!(!Rc::ptr_eq(&first, &third));
        assert_eq!(resolver.computations(), 2);

        resolver.resolve(&retitled.clone().with_width(320.0)).unwrap();
        assert_eq!(resolver.computations(), 3);
    }

    #[test]
    fn test_large_title_disabled_uses_compact_layout() {
        let mut resolver = TitleMetricsResolver::default();
        let metrics = resolver.resolve(&config().with_large_title(false)).unwrap();
        assert_eq!(metrics.expanded, metrics.collapsed);
    }

    #[test]
    fn test_long_title_truncates_to_header_width() {
        let mut resolver = TitleMetricsResolver::default();
        let long = "هذا نص تجريبي باللغة العربية لاختبار وظيفة العنوان الكبير";
        let metrics = resolver.resolve(&config().with_title(long)).unwrap();
        assert!(metrics.expanded.truncated);
        assert!(metrics.expanded.width <= 390.0 - 2.0 * LARGE_TITLE_INSET);
        assert!(metrics.collapsed.width <= metrics.bar.title_slot.width);
    }

    #[test]
    fn test_back_label_widens_back_slot() {
        let mut resolver = TitleMetricsResolver::default();
        let plain = resolver.resolve(&config()).unwrap();
        let labelled = resolver
            .resolve(&config().with_back_button(Some(BackButton::labelled("Back"))))
            .unwrap();

        let plain_back = plain.bar.back_button.unwrap();
        let labelled_back = labelled.bar.back_button.unwrap();
        assert_eq!(plain_back.width, BACK_CHEVRON_WIDTH);
        assert!(labelled_back.width > plain_back.width);
        assert!(labelled.back_label.is_some());

        let without = resolver.resolve(&config().with_back_button(None)).unwrap();
        assert!(without.bar.back_button.is_none());
    }

    #[test]
    fn test_unresolvable_metrics() {
        let mut resolver = TitleMetricsResolver::new(Rc::new(BrokenMeasurer));
        let err = resolver.resolve(&config()).unwrap_err();
        assert!(matches!(err, LayoutError::UnresolvableMetrics { .. }));
    }
}
