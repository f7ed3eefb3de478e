pub mod render_client;
