//! # Taskboard API ライブラリ
//!
//! カンバンタスクの CRUD を上流の REST バックエンド（Supabase）に
//! 中継する API サーバーのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーターとレイヤーの構築
//! - `client`: 上流バックエンドクライアント（Supabase PostgREST）
//! - `error`: エンベロープ形式のレスポンスヘルパー
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（CORS ヘッダー付与）

pub mod app_builder;
pub mod client;
pub mod error;
pub mod handler;
pub mod middleware;
