use crate::api::Api;
use crate::domain::address::AddressTree;

/// Everything a route handler needs: the backend handle and the static
/// region tree, both cheap to share across worker threads.
#[derive(Clone)]
pub struct App {
    pub api: Api,
    pub regions: AddressTree,
}

impl App {
    pub fn new(api: Api, regions: AddressTree) -> Self {
        Self { api, regions }
    }
}
