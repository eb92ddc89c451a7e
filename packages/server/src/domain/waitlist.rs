//! マッチメイキング待機列
//!
//! タグごとの待機バケットと性別互換性マッチングを実装します。
//! ここがマッチングの不変条件（1 エントリにつき最大 1 回のマッチ、
//! バケット内 FIFO、自己マッチ禁止）を担う中核モジュールです。

use std::collections::{HashMap, VecDeque};

use super::value_object::{ClientId, Gender, Tag};

/// 待機列のエントリ
///
/// 1 接続につき同時に存在できるエントリは最大 1 つ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub client_id: ClientId,
    pub gender: Gender,
    pub desired_partner_gender: Gender,
}

/// `offer` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// 互換性のある相手が見つからず、待機列に追加された
    Queued,
    /// 互換性のある相手とマッチした（相手のエントリは待機列から除去済み）
    Matched(ClientId),
}

/// タグ別のマッチメイキング待機列
///
/// バケットは挿入順を保持し、マッチングは先頭から走査して
/// 最古の互換エントリを選びます。マッチしたエントリは即座に除去され、
/// これが「1 エントリにつき最大 1 回のマッチ」を保証する機構です。
#[derive(Debug, Default)]
pub struct Waitlist {
    /// タグごとの待機バケット（挿入順保持）
    buckets: HashMap<Tag, VecDeque<WaitlistEntry>>,
    /// 切断時のクリーンアップ用: クライアント → 待機中のタグ
    tag_by_client: HashMap<ClientId, Tag>,
}

impl Waitlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// タグを申告し、互換性のある相手を探す
    ///
    /// バケットを先頭から走査し、最初に見つかった
    /// 「相手の性別 == 自分の希望」かつ「相手の希望 == 自分の性別」
    /// （対称互換）のエントリとマッチします。見つからなければ末尾に追加します。
    /// `Unspecified` は通常の値として厳密に比較されます。
    ///
    /// 既に待機中のクライアントが再申告した場合、以前のエントリは
    /// 先に取り下げられます。自分自身とはマッチしません。
    pub fn offer(
        &mut self,
        tag: Tag,
        client_id: ClientId,
        gender: Gender,
        desired_partner_gender: Gender,
    ) -> MatchResult {
        // 再申告は以前のエントリを置き換える
        self.withdraw_client(&client_id);

        let bucket = self.buckets.entry(tag.clone()).or_default();

        let position = bucket.iter().position(|entry| {
            entry.client_id != client_id
                && entry.gender == desired_partner_gender
                && entry.desired_partner_gender == gender
        });

        match position {
            Some(index) => {
                let matched = bucket.remove(index).expect("position is in bounds");
                if bucket.is_empty() {
                    self.buckets.remove(&tag);
                }
                self.tag_by_client.remove(&matched.client_id);
                MatchResult::Matched(matched.client_id)
            }
            None => {
                bucket.push_back(WaitlistEntry {
                    client_id: client_id.clone(),
                    gender,
                    desired_partner_gender,
                });
                self.tag_by_client.insert(client_id, tag);
                MatchResult::Queued
            }
        }
    }

    /// 指定タグの待機列からエントリを取り下げる
    ///
    /// 既にマッチ済み・不在の場合は何もしません（冪等）。
    pub fn withdraw(&mut self, tag: &Tag, client_id: &ClientId) {
        if let Some(bucket) = self.buckets.get_mut(tag) {
            bucket.retain(|entry| &entry.client_id != client_id);
            if bucket.is_empty() {
                self.buckets.remove(tag);
            }
        }
        if self.tag_by_client.get(client_id) == Some(tag) {
            self.tag_by_client.remove(client_id);
        }
    }

    /// クライアントの待機エントリをタグ不問で取り下げる
    ///
    /// 切断時のクリーンアップに使用します。待機していなければ何もしません（冪等）。
    pub fn withdraw_client(&mut self, client_id: &ClientId) {
        if let Some(tag) = self.tag_by_client.remove(client_id) {
            if let Some(bucket) = self.buckets.get_mut(&tag) {
                bucket.retain(|entry| &entry.client_id != client_id);
                if bucket.is_empty() {
                    self.buckets.remove(&tag);
                }
            }
        }
    }

    /// クライアントが待機中かどうか
    pub fn is_waiting(&self, client_id: &ClientId) -> bool {
        self.tag_by_client.contains_key(client_id)
    }

    /// 待機中エントリの総数
    pub fn waiting_count(&self) -> usize {
        self.buckets.values().map(VecDeque::len).sum()
    }
}
