// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    future::Future,
    sync::Arc,
};

use log::debug;
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, OnceCell};

use crate::error::{Error, Internal, Result};

type Slot = Arc<OnceCell<Arc<dyn Any + Send + Sync>>>;

/// Hands out one shared instance per type and target for as long as the
/// process runs.
#[derive(Default)]
pub(crate) struct InstanceCache {
    slots: Mutex<HashMap<(TypeId, String), Slot>>,
}

pub(crate) static INSTANCES: Lazy<InstanceCache> = Lazy::new(InstanceCache::new);

impl InstanceCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the `T` already built for `key`, or builds it with `factory`.
    ///
    /// Callers racing on the same key all wait for a single run of
    /// `factory`. If it fails, nothing is stored and the next caller gets to
    /// try again.
    pub(crate) async fn get_or_create<T, F, Fut>(&self, key: &str, factory: F) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(
                slots
                    .entry((TypeId::of::<T>(), key.to_owned()))
                    .or_default(),
            )
        };

        let instance = slot
            .get_or_try_init(|| async move {
                debug!("Creating a new instance for {}", std::any::type_name::<T>());
                let instance: Arc<dyn Any + Send + Sync> = Arc::new(factory().await?);
                Ok::<_, Error>(instance)
            })
            .await?;

        Arc::clone(instance)
            .downcast::<T>()
            .map_err(|_| Internal::CachedTypeMismatch.into())
    }
}
