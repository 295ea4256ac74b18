//! In-process fetcher and page builders for backup engine tests

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::{Fetcher, Response};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) const BASE: &str = "http://sc.test";

/// Serves canned pages by exact URL and records every request
#[derive(Default)]
pub(crate) struct StubFetcher {
    pages: HashMap<String, (u16, String)>,
    requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), (200, body.into()));
        self
    }

    pub(crate) fn redirect(mut self, url: impl Into<String>) -> Self {
        self.pages.insert(url.into(), (302, String::new()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self, needle: &str) -> usize {
        self.requests()
            .iter()
            .filter(|url| url.contains(needle))
            .count()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Response> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.pages.get(url) {
            Some((status, body)) => Ok(Response {
                url: url.to_string(),
                status: *status,
                body: body.clone(),
            }),
            None => Err(Error::HttpStatus {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

pub(crate) fn config() -> Config {
    Config {
        base_url: BASE.to_string(),
        concurrency: 4,
        ..Default::default()
    }
}

pub(crate) fn collection_page(filter: &str, declared: usize, ids: &[&str]) -> String {
    let items: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<li class="elco-collection-item"><div class="elco-collection-content">
                   <figure class="elco-collection-poster" data-sc-product-id="{id}"></figure>
                   <h2 class="elco-title"><a href="/p/{id}">Title {id}</a></h2>
                   </div></li>"#
            )
        })
        .collect();

    format!(
        r#"<html><body>
        <ul><li data-sc-collection-filter="{filter}"><a><span>x <span>({declared})</span></span></a></li></ul>
        <ul>{items}</ul>
        </body></html>"#
    )
}

pub(crate) fn list_page(title: &str, declared: usize, ids: &[&str]) -> String {
    let items: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<li class="elli-item"><div class="elli-media"><figure data-sc-product-id="{id}"></figure></div>
                   <div class="elli-content"><h2 class="elco-title"><a href="/p/{id}">Title {id}</a></h2></div></li>"#
            )
        })
        .collect();

    format!(
        r#"<html><body>
        <h1 class="d-heading1 elme-listTitle">{title}</h1>
        <span data-rel="list-products-count">{declared}</span>
        <ol>{items}</ol>
        </body></html>"#
    )
}

pub(crate) fn journal_page(declared: usize, lines: &[(&str, &str)]) -> String {
    let rows: String = lines
        .iter()
        .map(|(id, date)| {
            format!(
                r#"<li class="eldi-list-item" data-sc-datedone="{date}"><div class="eldi-collection-container">
                   <figure class="eldi-collection-poster" data-sc-product-id="{id}"></figure></div></li>"#
            )
        })
        .collect();

    format!(
        r#"<html><body>
        <span class="elco-collection-count">({declared})</span>
        <ul>{rows}</ul>
        </body></html>"#
    )
}
