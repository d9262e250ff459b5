//! File adapter around [`serial_decoder`].
//!
//! Reads candidate tables, runs a [`serial_decoder::SerialDecoder`] over
//! them and writes the expanded and could-not-expand tables. The
//! `serial-expand` binary is a thin clap front end over [`cli`].

pub mod cli;
pub mod io;
pub mod logging;
