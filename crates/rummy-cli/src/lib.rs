pub mod advice_utils;
