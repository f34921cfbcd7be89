use crate::utils::error::Result;
use std::ops::RangeInclusive;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn items_per_page(&self) -> usize;
    fn data_dir(&self) -> &str;
    fn default_file(&self) -> Option<&str>;
    fn max_phone_length(&self) -> usize;
    fn clear_screen(&self) -> bool;
}

/// 與操作者互動的同步介面。
///
/// 實作必須自行處理無效輸入（重新詢問，不回傳錯誤）；只有輸入來源
/// 結束時才回傳 `ContactBookError::InputClosed`。
pub trait InteractionPort {
    fn show(&mut self, text: &str);

    /// 詢問 `valid` 範圍內的整數，直到輸入合法為止
    fn ask_choice(&mut self, prompt: &str, valid: RangeInclusive<i64>) -> Result<i64>;

    /// 只接受 y/yes/n/no（不分大小寫）
    fn ask_yes_no(&mut self, prompt: &str) -> Result<bool>;

    fn ask_text(&mut self, prompt: &str) -> Result<String>;

    fn clear(&mut self) {}

    fn pause(&mut self) -> Result<()> {
        self.ask_text("Press ENTER to continue.").map(|_| ())
    }

    /// `0..=len-1` 的索引；`len` 必須大於 0
    fn ask_index(&mut self, prompt: &str, len: usize) -> Result<usize> {
        debug_assert!(len > 0, "ask_index needs at least one option");
        let max = len.saturating_sub(1) as i64;
        let choice = self.ask_choice(prompt, 0..=max)?;
        Ok(choice as usize)
    }
}

impl<T: InteractionPort + ?Sized> InteractionPort for &mut T {
    fn show(&mut self, text: &str) {
        (**self).show(text)
    }

    fn ask_choice(&mut self, prompt: &str, valid: RangeInclusive<i64>) -> Result<i64> {
        (**self).ask_choice(prompt, valid)
    }

    fn ask_yes_no(&mut self, prompt: &str) -> Result<bool> {
        (**self).ask_yes_no(prompt)
    }

    fn ask_text(&mut self, prompt: &str) -> Result<String> {
        (**self).ask_text(prompt)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn pause(&mut self) -> Result<()> {
        (**self).pause()
    }
}
