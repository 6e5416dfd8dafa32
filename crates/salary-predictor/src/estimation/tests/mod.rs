mod common;
mod facade;
mod payloads;
