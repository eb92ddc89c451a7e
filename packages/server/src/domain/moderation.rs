//! モデレーションフィルタ
//!
//! ブラックリストに一致するトークンをアスタリスクで伏せ字にする純粋関数です。
//! マッチングはトークン単位の完全一致（大文字小文字を無視）であり、
//! 長いトークンに埋め込まれた語は伏せ字になりません。これは互換性のため
//! 意図的に維持している仕様です。

use std::collections::HashSet;

/// 大文字小文字を無視するブラックリスト
///
/// プロセス全体で共有される静的な語彙集合。接続ごとの状態は持ちません。
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    words: HashSet<String>,
}

impl Blacklist {
    /// 語のリストからブラックリストを構築する（小文字に正規化して保持）
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// 組み込みのデフォルト語彙
    pub fn builtin() -> Self {
        const DEFAULT_WORDS: &[&str] = &[
            "damn", "hell", "crap", "idiot", "stupid", "moron", "jerk", "loser",
        ];
        Self::from_words(DEFAULT_WORDS.iter().copied())
    }

    /// トークンがブラックリストに含まれるか（大文字小文字を無視）
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// テキストを伏せ字処理する
///
/// 空白の連なりでトークンに分割し、ブラックリストに完全一致するトークンを
/// 元の文字数分のアスタリスクに置き換え、単一スペースで再結合します。
/// 内部の空白が単一スペースに正規化される点は仕様どおりの不可逆変換です。
pub fn censor(text: &str, blacklist: &Blacklist) -> String {
    text.split_whitespace()
        .map(|token| {
            if blacklist.contains(token) {
                "*".repeat(token.chars().count())
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_censor_masks_blacklisted_token() {
        // テスト項目: ブラックリストの語が同じ長さのアスタリスクに置換される
        // given (前提条件):
        let blacklist = Blacklist::from_words(["bad"]);

        // when (操作):
        let result = censor("this is a BAD word", &blacklist);

        // then (期待する結果): 大文字小文字を無視し、文字数が保存される
        assert_eq!(result, "this is a *** word");
    }

    #[test]
    fn test_censor_is_exact_token_match() {
        // テスト項目: 長いトークンに埋め込まれた語は伏せ字にならない
        // given (前提条件):
        let blacklist = Blacklist::from_words(["bad"]);

        // when (操作):
        let result = censor("badminton is not bad", &blacklist);

        // then (期待する結果): "badminton" はそのまま、"bad" のみ置換
        assert_eq!(result, "badminton is not ***");
    }

    #[test]
    fn test_censor_normalizes_internal_whitespace() {
        // テスト項目: 内部の連続空白が単一スペースに正規化される
        // given (前提条件):
        let blacklist = Blacklist::from_words(["bad"]);

        // when (操作):
        let result = censor("hello \t  world\n bad", &blacklist);

        // then (期待する結果):
        assert_eq!(result, "hello world ***");
    }

    #[test]
    fn test_censor_preserves_multibyte_token_length() {
        // テスト項目: マルチバイト文字の語もバイト数ではなく文字数で伏せ字になる
        // given (前提条件):
        let blacklist = Blacklist::from_words(["ばか"]);

        // when (操作):
        let result = censor("あなたは ばか です", &blacklist);

        // then (期待する結果): 2 文字分のアスタリスク
        assert_eq!(result, "あなたは ** です");
    }

    #[test]
    fn test_censor_with_empty_blacklist() {
        // テスト項目: 空のブラックリストでは置換が起こらない
        // given (前提条件):
        let blacklist = Blacklist::default();
        assert!(blacklist.is_empty());

        // when (操作):
        let result = censor("anything goes here", &blacklist);

        // then (期待する結果):
        assert_eq!(result, "anything goes here");
    }

    #[test]
    fn test_from_words_normalizes_and_skips_blanks() {
        // テスト項目: 構築時に空白語が除外され、大文字が正規化される
        // given (前提条件):
        let blacklist = Blacklist::from_words(["  BAD  ", "", "   "]);

        // when (操作) / then (期待する結果):
        assert_eq!(blacklist.len(), 1);
        assert!(blacklist.contains("bad"));
        assert!(blacklist.contains("Bad"));
    }
}
