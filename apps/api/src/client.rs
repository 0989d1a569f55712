//! # 上流バックエンドクライアント
//!
//! Supabase PostgREST との通信を担当する。

pub mod supabase;

pub use supabase::{SupabaseClient, SupabaseClientImpl, SupabaseError, TaskPatch, TaskUpsert};
