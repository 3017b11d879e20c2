//! Routes requests to the adaptor of the named chain.

use std::{collections::HashMap, sync::Arc};
use tracing::warn;

use crate::services::adaptor::ChainAdaptor;

/// Chain name to adaptor lookup
///
/// Each adaptor is reachable through its slug and every alias it reports.
/// Names are matched case-insensitively.
#[derive(Default, Clone)]
pub struct AdaptorRegistry {
	adaptors: HashMap<String, Arc<dyn ChainAdaptor>>,
	slugs: Vec<String>,
}

impl AdaptorRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `adaptor` under its slug and aliases
	///
	/// A name that is already taken keeps pointing at the earlier adaptor.
	pub fn register(&mut self, adaptor: Arc<dyn ChainAdaptor>) {
		let slug = adaptor.chain_name().to_string();
		let names = std::iter::once(slug.clone()).chain(adaptor.aliases());

		for name in names {
			let key = name.to_lowercase();
			if let Some(existing) = self.adaptors.get(&key) {
				if !Arc::ptr_eq(existing, &adaptor) {
					warn!(
						name = %name,
						chain = %slug,
						owner = %existing.chain_name(),
						"chain name already registered, keeping the first adaptor"
					);
				}
				continue;
			}
			self.adaptors.insert(key, Arc::clone(&adaptor));
		}
		self.slugs.push(slug);
	}

	pub fn get(&self, chain: &str) -> Option<Arc<dyn ChainAdaptor>> {
		self.adaptors.get(&chain.to_lowercase()).cloned()
	}

	/// Slugs of the registered adaptors, in registration order
	pub fn chains(&self) -> &[String] {
		&self.slugs
	}

	pub fn is_empty(&self) -> bool {
		self.slugs.is_empty()
	}

	pub fn len(&self) -> usize {
		self.slugs.len()
	}
}
