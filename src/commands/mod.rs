// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod add;
pub mod list;
pub mod dashboard;
pub mod delete;
pub mod export;
pub mod shell;
