/// Reachability of the record store as decided at startup.
pub trait StoreHealth: Send + Sync {
    fn is_reachable(&self) -> bool;
}
