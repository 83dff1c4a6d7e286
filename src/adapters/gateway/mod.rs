pub mod local_gateway;
