//! 页面抓取
//!
//! `ContentFetcher` 是编排器与网络之间的接缝，测试中可替换为脚本化实现。

pub mod extract;

pub use extract::extract_text;

use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;

use crate::error::FetchError;

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; WebsiteMonitorBot/1.0)";
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// 获取页面并提取文本
pub trait ContentFetcher {
    fn fetch(&self, url: &str, selector: &str) -> Result<String, FetchError>;
}

/// 基于 reqwest 阻塞客户端的实现
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self::with_client(Self::client_builder().build()?))
    }

    /// 固定 User-Agent 与超时的客户端配置
    pub fn client_builder() -> ClientBuilder {
        Client::builder().user_agent(USER_AGENT).timeout(FETCH_TIMEOUT)
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl ContentFetcher for HttpFetcher {
    fn fetch(&self, url: &str, selector: &str) -> Result<String, FetchError> {
        let res = self.client.get(url).send()?;

        if !res.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: res.status().as_u16(),
            });
        }

        let body = res.text()?;
        extract_text(&body, selector)
    }
}
