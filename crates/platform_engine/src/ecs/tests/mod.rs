//! Integration tests driving the full system pipeline frame by frame

mod scenarios;
