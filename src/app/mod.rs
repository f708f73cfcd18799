// Application layer: the concrete page set rendered by the router.

pub mod pages;
