/*
    Copyright © 2026, Simulator-rs Contributors
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Types that are used across multiple components of the simulation pipeline.

pub mod basic;

pub mod crypto_primitives;

pub mod transaction;

pub mod proposal;

pub mod block;
