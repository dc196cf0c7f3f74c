// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::fn_wrapper::define_fn_wrapper;
use crate::{OnClosedArgs, OnHalfOpenArgs, OnOpenedArgs};

define_fn_wrapper!(OnOpened(Fn(args: OnOpenedArgs<'_>)));
define_fn_wrapper!(OnHalfOpen(Fn(args: OnHalfOpenArgs<'_>)));
define_fn_wrapper!(OnClosed(Fn(args: OnClosedArgs<'_>)));
