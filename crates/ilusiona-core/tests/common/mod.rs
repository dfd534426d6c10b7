pub mod png_server;
