//! Video card enrichment through oEmbed.
//!
//! Cards are rendered server-side with placeholder title and channel text.
//! Each card is looked up once, when it first comes near the viewport, and
//! the placeholders are replaced on success. Failures leave them as they are.

use futures::future::{Either, select};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Reflect};
use smart_core::{VideoMeta, config::VideoConfig, oembed};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    AbortController, AbortSignal, Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::{
    dom::{self, Page},
    error::{DomError, Result},
};

const CARDS: &str = ".youtube-card-container[data-youtube-id]";
const ENRICHED: &str = "youtubeEnriched";

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

async fn request_meta(url: &str, signal: &AbortSignal) -> Result<VideoMeta> {
    let response = Request::get(url).abort_signal(Some(signal)).send().await?;
    if !response.ok() {
        return Err(DomError::Status(response.status()));
    }
    let body = response.text().await?;
    Ok(VideoMeta::from_json(&body)?)
}

/// Fetch oEmbed metadata for `video_id`, aborting after the configured
/// timeout.
pub async fn fetch_meta(video_id: &str, config: &VideoConfig) -> Result<VideoMeta> {
    let url = oembed::oembed_url(&config.endpoint, video_id, |s| {
        String::from(js_sys::encode_uri_component(s))
    });
    let controller = AbortController::new()?;
    let signal = controller.signal();

    let request = Box::pin(request_meta(&url, &signal));
    let timer = Box::pin(TimeoutFuture::new(config.timeout_ms));
    match select(request, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            controller.abort();
            Err(DomError::Timeout(config.timeout_ms))
        }
    }
}

/// Replace a card's placeholder text. The channel keeps its placeholder when
/// the response names no author.
pub fn fill(card: &Element, meta: &VideoMeta) {
    if let Some(title) = dom::query_in(card, ".youtube-title") {
        title.set_text_content(Some(&meta.title));
    }
    if let (Some(author), Some(channel)) =
        (&meta.author_name, dom::query_in(card, ".youtube-channel"))
    {
        channel.set_text_content(Some(author));
    }
}

/// Fill in one card. The card is marked enriched whatever the outcome.
pub async fn enrich(card: Element, config: VideoConfig) {
    if dom::data(&card, ENRICHED).as_deref() == Some("1") {
        return;
    }
    let video_id = card
        .get_attribute("data-youtube-id")
        .filter(|id| !id.is_empty());

    if let Some(video_id) = video_id {
        match fetch_meta(&video_id, &config).await {
            Ok(meta) => fill(&card, &meta),
            Err(err) => log::debug!("video {video_id} not enriched: {err}"),
        }
    }
    dom::set_data(&card, ENRICHED, "1");
}

/// Lazily enriches every video card on the page.
pub struct VideoCards {
    observer: Option<IntersectionObserver>,
    _callback: Option<ObserverCallback>,
    cards: usize,
}

impl VideoCards {
    /// Observe the page's cards. Without `IntersectionObserver` every card
    /// is enriched immediately. Returns `None` if there are no cards.
    pub fn mount(page: &Page, config: &VideoConfig) -> Option<Self> {
        let cards = page.query_all(CARDS);
        if cards.is_empty() {
            return None;
        }
        let count = cards.len();

        let supported =
            Reflect::has(&page.window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
        if !supported {
            log::debug!("IntersectionObserver unavailable, enriching {count} cards now");
            for card in cards {
                spawn_local(enrich(card, config.clone()));
            }
            return Some(Self {
                observer: None,
                _callback: None,
                cards: count,
            });
        }

        let callback_config = config.clone();
        let callback: ObserverCallback =
            Closure::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let card = entry.target();
                        observer.unobserve(&card);
                        spawn_local(enrich(card, callback_config.clone()));
                    }
                }
            });

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&config.root_margin);
        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => observer,
                Err(err) => {
                    log::warn!("cannot observe video cards: {}", DomError::from(err));
                    return None;
                }
            };
        for card in &cards {
            observer.observe(card);
        }
        log::debug!("observing {count} video cards");

        Some(Self {
            observer: Some(observer),
            _callback: Some(callback),
            cards: count,
        })
    }

    /// Number of cards found on the page.
    pub fn len(&self) -> usize {
        self.cards
    }

    /// Whether no cards were found.
    pub fn is_empty(&self) -> bool {
        self.cards == 0
    }
}

impl Drop for VideoCards {
    fn drop(&mut self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}
