// Interface adapters: wire protocol, network handling, external clients and
// persistence.

pub mod clients;
pub mod net;
pub mod protocol;
pub mod state;
pub mod storage;
