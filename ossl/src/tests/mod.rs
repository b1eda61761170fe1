// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

#[allow(dead_code)]
#[path = "../../capabilities.rs"]
mod version_map;
