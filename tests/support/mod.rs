//! 偽の取得実装（ネットワークなし）
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use tt_rating_diff::net::{FetchError, Fetcher, Page};

pub const INDEX_URL: &str = "https://example.com/tt_rating/habikino.html";

/// URL → 応答の表。登録の無いURLは404
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, Vec<std::result::Result<String, FetchError>>>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に同じ本文を返す
    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), vec![Ok(body.to_string())]);
        self
    }

    /// 呼ばれるたびに順に応答する（最後の応答は繰り返す）
    pub fn sequence(mut self, url: &str, responses: Vec<std::result::Result<String, FetchError>>) -> Self {
        self.pages.insert(url.to_string(), responses);
        self
    }

    pub fn count(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|u| *u == url).count()
    }
}

impl Fetcher for FakeSite {
    fn get(&self, url: &str) -> std::result::Result<Page, FetchError> {
        let n = self.count(url);
        self.requests.borrow_mut().push(url.to_string());

        let responses = self.pages.get(url).ok_or(FetchError::Status(404))?;
        let response = responses
            .get(n)
            .or_else(|| responses.last())
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))?;
        Ok(Page {
            url: url.to_string(),
            body: response,
        })
    }
}

pub const INDEX_HTML: &str = r#"<html><head><meta charset="Shift_JIS"></head><body>
<ul>
  <li><a href="./r293/index.htm">第293回 羽曳野レイティング</a></li>
  <li><a href="./r294/index.htm">第294回 羽曳野レイティング</a></li>
  <li><a href="./r295/index.htm">第295回 羽曳野レイティング</a></li>
</ul>
</body></html>"#;

pub const FRAME_HTML: &str = r#"<html><frameset rows="*,20">
<frame src="index_files/sheet001.htm" name="frSheet">
<frame src="index_files/tabstrip.htm" name="frTabs">
</frameset></html>"#;

pub const SHEET_HTML: &str = r#"<html><body>
<table>
 <tr><td></td><td></td><td></td><td></td><td></td></tr>
 <tr><td></td><td colspan="3">第294回羽曳野レイティング（2024.5.12）</td><td></td></tr>
 <tr><td>会員番号</td><td>R</td><td>会員番号</td><td>R</td><td></td></tr>
 <tr><td>2345678</td><td>1872</td><td>3000001</td><td>1610</td><td></td></tr>
 <tr><td>3000000</td><td>1490</td><td>3000002</td><td>1422</td><td>※</td></tr>
 <tr><td>3000003</td><td>1300</td><td></td><td></td><td></td></tr>
 <tr><td></td><td></td><td></td><td></td><td></td></tr>
</table>
</body></html>"#;
