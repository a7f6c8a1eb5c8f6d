//! Taffy Bridge - compact bar row layout
//!
//! The compact bar is a single flex row:
//!
//! ```text
//! | inset | back button | title slot (flex-grow) | inset |
//! ```
//!
//! The compact title is centered inside the title slot, so the slot is the
//! "remaining header width" after the back button.

use taffy::{
    AlignItems, AvailableSpace, Dimension, FlexDirection, LengthPercentage, NodeId, Rect,
    Size as TaffySize, Style, TaffyTree,
};

use crate::error::LayoutError;
use crate::types::{Frame, Size};

use super::{BAR_HEIGHT, BAR_INSET};

/// Compact bar slots in the left-to-right frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub back_button: Option<Frame>,
    pub title_slot: Frame,
    pub height: f32,
}

fn length(value: f32) -> Dimension {
    Dimension::Length(value)
}

fn fixed_leaf(size: Size) -> Style {
    Style {
        size: TaffySize {
            width: length(size.width),
            height: length(size.height),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

fn frame_of(tree: &TaffyTree<()>, node: NodeId) -> Result<Frame, LayoutError> {
    let layout = tree.layout(node)?;
    Ok(Frame::new(
        layout.location.x,
        layout.location.y,
        layout.size.width,
        layout.size.height,
    ))
}

/// Lay out the compact bar for a header of `header_width`.
///
/// `back_button` is the size of the back button content, if shown.
pub fn compute_bar_layout(
    header_width: f32,
    back_button: Option<Size>,
) -> Result<BarLayout, LayoutError> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    tree.disable_rounding();

    let back = back_button.map(|size| tree.new_leaf(fixed_leaf(size))).transpose()?;

    let title_slot = tree.new_leaf(Style {
        flex_grow: 1.0,
        flex_shrink: 1.0,
        flex_basis: length(0.0),
        size: TaffySize {
            width: Dimension::Auto,
            height: length(BAR_HEIGHT),
        },
        ..Default::default()
    })?;

    let children: Vec<NodeId> = back.into_iter().chain(Some(title_slot)).collect();
    let row = tree.new_with_children(
        Style {
            flex_direction: FlexDirection::Row,
            align_items: Some(AlignItems::Center),
            size: TaffySize {
                width: length(header_width),
                height: length(BAR_HEIGHT),
            },
            padding: Rect {
                left: LengthPercentage::Length(BAR_INSET),
                right: LengthPercentage::Length(BAR_INSET),
                top: LengthPercentage::Length(0.0),
                bottom: LengthPercentage::Length(0.0),
            },
            ..Default::default()
        },
        &children,
    )?;

    tree.compute_layout(
        row,
        TaffySize {
            width: AvailableSpace::Definite(header_width),
            height: AvailableSpace::Definite(BAR_HEIGHT),
        },
    )?;

    Ok(BarLayout {
        back_button: back.map(|node| frame_of(&tree, node)).transpose()?,
        title_slot: frame_of(&tree, title_slot)?,
        height: BAR_HEIGHT,
    })
}
