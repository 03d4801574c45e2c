//! ページネーション状態モジュール
//!
//! 履歴一覧の現在ページ・総件数・総ページ数を管理する。
//! 不変条件: `1 <= current_page <= max(1, total_pages)`。
//! 範囲外のページ番号は常にクランプし、サーバーへは送らない。

use crate::error::{Error, Result};

/// 1ページあたりの既定件数
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// ページネーション状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    current_page: u32,
    page_size: u32,
    total_count: u64,
    total_pages: u32,
}

impl PageState {
    /// 新しいページ状態を作る（総件数は未取得の0で始まる）
    pub fn new(page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::Pagination("ページサイズは1以上が必要です".into()));
        }
        Ok(Self {
            current_page: 1,
            page_size,
            total_count: 0,
            total_pages: 0,
        })
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// サーバー応答の総件数・総ページ数を反映する
    ///
    /// サーバーが `pages` を返さない場合は `ceil(count / page_size)` を導出する。
    /// 反映後、現在ページは新しい範囲にクランプされる。
    pub fn apply_totals(&mut self, count: u64, pages: Option<u32>) {
        self.total_count = count;
        self.total_pages = pages.unwrap_or_else(|| {
            ((count + self.page_size as u64 - 1) / self.page_size as u64) as u32
        });
        self.current_page = self.clamp(self.current_page);
    }

    /// ページ番号を `[1, total_pages]`（総ページ0なら `[1, 1]`）に収める
    pub fn clamp(&self, page: u32) -> u32 {
        page.max(1).min(self.total_pages.max(1))
    }

    /// 現在ページを設定する（クランプ付き）
    pub fn set_current(&mut self, page: u32) {
        self.current_page = self.clamp(page);
    }

    /// 次のページ番号。最終ページでは `None`
    pub fn next_page(&self) -> Option<u32> {
        if self.current_page < self.total_pages {
            Some(self.current_page + 1)
        } else {
            None
        }
    }

    /// 前のページ番号。先頭ページでは `None`
    pub fn previous_page(&self) -> Option<u32> {
        if self.current_page > 1 {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    /// 表示中の件数範囲（1始まりの開始・終了）。0件なら `None`
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.total_count == 0 {
            return None;
        }
        let start = (self.current_page as u64 - 1) * self.page_size as u64 + 1;
        let end = (self.current_page as u64 * self.page_size as u64).min(self.total_count);
        Some((start, end))
    }

    /// ページ番号のウィンドウを組み立てる
    ///
    /// 最大 `max_visible` 個の番号を現在ページ中心に並べ、
    /// 先頭・末尾ページが外れる場合は省略記号を挟んで補う。
    pub fn page_window(&self, max_visible: u32) -> Vec<PageItem> {
        if self.total_pages == 0 || max_visible == 0 {
            return Vec::new();
        }

        let mut start = self.current_page.saturating_sub(max_visible / 2).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        if end - start + 1 < max_visible {
            start = end.saturating_sub(max_visible - 1).max(1);
        }

        let mut items = Vec::new();

        if start > 1 {
            items.push(PageItem::page(1, self.current_page));
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }

        for number in start..=end {
            items.push(PageItem::page(number, self.current_page));
        }

        if end < self.total_pages {
            if end < self.total_pages - 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::page(self.total_pages, self.current_page));
        }

        items
    }
}

/// ページ番号ウィンドウの要素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// ページ番号（現在ページかどうかを含む）
    Page { number: u32, current: bool },
    /// 省略記号
    Ellipsis,
}

impl PageItem {
    fn page(number: u32, current_page: u32) -> Self {
        PageItem::Page {
            number,
            current: number == current_page,
        }
    }
}
