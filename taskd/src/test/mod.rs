//! End-to-end API tests against an in-memory test server.
