// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod filter;
pub mod models;
pub mod service;
pub mod session;
pub mod store;
pub mod utils;
pub mod validation;
