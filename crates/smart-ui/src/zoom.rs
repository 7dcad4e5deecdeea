//! Hover zoom for content images.

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement};

use crate::{
    dom::{self, Page},
    error::{DomError, Result},
};

const FIGURE_ITEMS: &str = "#content figure.zoom:not([data-zoom-ready]) > :is(img, .face-tag-wrap)";
const SINGLES: &str = "#content img.zoom:not(figure img):not(.no-zoom):not([data-zoom-ready])";
const READY: &str = "zoomReady";

const WRAPPER_STYLE: &[(&str, &str)] = &[
    ("position", "relative"),
    ("overflow", "hidden"),
    ("border-radius", "var(--radius)"),
    ("line-height", "0"),
    ("display", "block"),
];
const SCALE_STYLE: &[(&str, &str)] = &[
    ("transform-origin", "center"),
    ("transition", "transform var(--duration-slow) var(--ease-in-out)"),
    ("display", "block"),
    ("line-height", "0"),
];
const IMAGE_STYLE: &[(&str, &str)] = &[
    ("border-radius", "0"),
    ("display", "block"),
    ("width", "100%"),
    ("height", "auto"),
];

fn is_ready(element: &Element) -> bool {
    dom::data(element, READY).as_deref() == Some("true")
}

fn mark_ready(element: &Element) {
    dom::set_data(element, READY, "true");
}

/// Move `element` into `div.zoom-inner > div.zoom-scale` and return the
/// wrapper's hover listeners.
fn wrap(page: &Page, element: &Element, wrapper_style: &[(&str, &str)]) -> Result<[EventListener; 2]> {
    let parent = element.parent_element().ok_or(DomError::Missing("parent"))?;

    let wrapper = page.document.create_element("div")?;
    wrapper.set_class_name("zoom-inner");
    dom::set_styles(&wrapper, wrapper_style);

    let scale = page.document.create_element("div")?;
    scale.set_class_name("zoom-scale");
    dom::set_styles(&scale, SCALE_STYLE);

    parent.insert_before(&wrapper, Some(element))?;
    wrapper.append_child(&scale)?;
    scale.append_child(element)?;

    let hover = |event_type: &'static str, transform: &'static str| {
        let scale = scale.clone();
        EventListener::new_with_options(
            &wrapper,
            event_type,
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: true,
            },
            move |_| dom::set_styles(&scale, &[("transform", transform)]),
        )
    };
    Ok([hover("pointerenter", "scale(1.02)"), hover("pointerleave", "scale(1)")])
}

fn wrap_figure_item(page: &Page, item: &Element) -> Result<Option<[EventListener; 2]>> {
    let Some(figure) = item.parent_element() else {
        return Ok(None);
    };
    if is_ready(&figure) {
        return Ok(None);
    }

    let face_wrap = item.class_list().contains("face-tag-wrap");
    let image = if face_wrap {
        dom::query_in(item, "img")
    } else {
        Some(item.clone())
    };
    let Some(image) = image.filter(|img| !img.class_list().contains("no-zoom")) else {
        mark_ready(&figure);
        return Ok(None);
    };

    if face_wrap {
        dom::set_styles(item, &[("display", "block"), ("line-height", "0")]);
    } else if image.is_instance_of::<HtmlImageElement>() {
        dom::set_styles(&image, IMAGE_STYLE);
    }
    let listeners = wrap(page, item, WRAPPER_STYLE)?;
    mark_ready(&figure);
    Ok(Some(listeners))
}

fn wrap_single(page: &Page, image: &Element) -> Result<Option<[EventListener; 2]>> {
    if is_ready(image) {
        return Ok(None);
    }
    let margin = page
        .window
        .get_computed_style(image)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("margin").ok())
        .filter(|margin| !margin.is_empty())
        .unwrap_or_else(|| "60px auto".to_string());

    let mut wrapper_style: Vec<(&str, &str)> = WRAPPER_STYLE.to_vec();
    wrapper_style.push(("margin", &margin));
    dom::set_styles(image, &[("margin", "0")]);
    dom::set_styles(image, IMAGE_STYLE);

    let listeners = wrap(page, image, &wrapper_style)?;
    mark_ready(image);
    Ok(Some(listeners))
}

/// Hover zoom on `figure.zoom` images and standalone `img.zoom`.
pub struct ImageZoom {
    _listeners: Vec<EventListener>,
    wrapped: usize,
}

impl ImageZoom {
    /// Wrap every zoomable image. Returns `None` under reduced motion.
    pub fn mount(page: &Page) -> Option<Self> {
        if page.prefers_reduced_motion() {
            log::debug!("reduced motion requested, image zoom disabled");
            return None;
        }

        let mut listeners = Vec::new();
        let figures = page.query_all(FIGURE_ITEMS);
        let singles = page.query_all(SINGLES);
        let results = figures
            .iter()
            .map(|item| wrap_figure_item(page, item))
            .chain(singles.iter().map(|image| wrap_single(page, image)));

        let mut wrapped = 0;
        for result in results {
            match result {
                Ok(Some(pair)) => {
                    listeners.extend(pair);
                    wrapped += 1;
                }
                Ok(None) => {}
                Err(err) => log::debug!("skipping zoom image: {err}"),
            }
        }

        Some(Self {
            _listeners: listeners,
            wrapped,
        })
    }

    /// Number of images wrapped.
    pub fn wrapped(&self) -> usize {
        self.wrapped
    }
}
