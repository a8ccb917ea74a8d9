//! The four counters of the factory economy.
//!
//! [`Stock`] is a plain value: it is the initial endowment handed to a
//! [`ResourcePool`](crate::pool::ResourcePool) and the consistent snapshot read back from it.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One counter of the pool.
///
/// The declaration order is the global lock order: any transaction touching several
/// counters locks them from the first variant to the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    Foo,
    Bar,
    Money,
    Foobar,
}

impl Resource {
    /// Every counter, in lock order. A pool snapshot locks exactly this sequence.
    pub const LOCK_ORDER: [Resource; 4] = [
        Resource::Foo,
        Resource::Bar,
        Resource::Money,
        Resource::Foobar,
    ];
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::Foo => "foo",
            Resource::Bar => "bar",
            Resource::Money => "money",
            Resource::Foobar => "foobar",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub foo: u32,
    pub bar: u32,
    pub foobar: u32,
    pub money: u32,
}

impl Stock {
    /// Nothing in store.
    pub const EMPTY: Stock = Stock {
        foo: 0,
        bar: 0,
        foobar: 0,
        money: 0,
    };

    /// One foo and one bar: enough for a first foobar attempt.
    pub const SEEDED: Stock = Stock {
        foo: 1,
        bar: 1,
        foobar: 0,
        money: 0,
    };
}
