// Storage layer for the Gatehouse server
// Decision: In-memory only for now; the UserDirectory trait in
// gatehouse-core is the seam where a persistent store would plug in

pub mod memory;

pub use memory::InMemoryUserStore;
