//! The [`batch`](self) module renders the mocks of many interfaces at once.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{available_parallelism, scope};

use parking_lot::Mutex;
use tracing::debug;

use crate::config::Options;
use crate::error::Result;
use crate::interface::{Declarations, Interface};
use crate::mock::Generator;

/// Generated file of one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Name of the interface.
    pub interface: String,

    /// Rendered file, or the error that stopped the generation.
    pub output: Result<String>,
}

/// Render the mock of every interface in `decls`.
///
/// Interfaces do not share any mutable state, so they are rendered in parallel
/// on scoped worker threads. The result is ordered by interface name.
#[must_use]
pub fn generate_all(decls: &Declarations, options: &Options) -> Vec<Generated> {
    let interfaces = decls.interfaces().collect::<Vec<_>>();
    let workers = available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(interfaces.len());

    debug!(interfaces = interfaces.len(), workers, "Generating mocks");

    let next = AtomicUsize::new(0);
    let results = Mutex::new(Vec::with_capacity(interfaces.len()));

    scope(|s| {
        for _ in 0..workers {
            s.spawn(|| loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(interface) = interfaces.get(index) else {
                    break;
                };

                let generated = generate_one(interface, decls, options);

                results.lock().push(generated);
            });
        }
    });

    let mut results = results.into_inner();
    results.sort_by(|a, b| a.interface.cmp(&b.interface));

    results
}

fn generate_one(interface: &Interface, decls: &Declarations, options: &Options) -> Generated {
    let output = Generator::new(interface, decls, options).map(|generator| generator.generate());

    Generated {
        interface: interface.name.clone(),
        output,
    }
}
