pub mod platform_client;
