use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{GameRng, Policy};

/// Fully connected network with one tanh hidden layer and linear outputs
///
/// Weights are stored row-major by input: `weights_ih[i * hidden + h]`
/// connects input `i` to hidden unit `h`, `weights_ho[h * outputs + o]`
/// connects hidden unit `h` to output `o`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedForwardNet {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
    pub weights_ih: Vec<f32>,
    pub weights_ho: Vec<f32>,
    pub bias_h: Vec<f32>,
    pub bias_o: Vec<f32>,
}

impl FeedForwardNet {
    /// Network with weights and biases uniform in [-1, 1)
    pub fn new_random(inputs: usize, hidden: usize, outputs: usize, rng: &mut GameRng) -> Self {
        let mut draw =
            |n: usize| -> Vec<f32> { (0..n).map(|_| rng.0.gen_range(-1.0..1.0)).collect() };
        let weights_ih = draw(inputs * hidden);
        let weights_ho = draw(hidden * outputs);
        let bias_h = draw(hidden);
        let bias_o = draw(outputs);

        Self {
            inputs,
            hidden,
            outputs,
            weights_ih,
            weights_ho,
            bias_h,
            bias_o,
        }
    }

    /// Whether the weight vectors agree with the declared layer sizes
    pub fn is_well_formed(&self) -> bool {
        self.weights_ih.len() == self.inputs * self.hidden
            && self.weights_ho.len() == self.hidden * self.outputs
            && self.bias_h.len() == self.hidden
            && self.bias_o.len() == self.outputs
    }

    pub fn forward(&self, inputs: &[f32]) -> Vec<f32> {
        let mut hidden = vec![0.0; self.hidden];
        for (h, value) in hidden.iter_mut().enumerate() {
            let mut sum = self.bias_h[h];
            for (i, &input) in inputs.iter().take(self.inputs).enumerate() {
                sum += input * self.weights_ih[i * self.hidden + h];
            }
            *value = sum.tanh();
        }

        let mut output = vec![0.0; self.outputs];
        for (o, value) in output.iter_mut().enumerate() {
            let mut sum = self.bias_o[o];
            for (h, &hv) in hidden.iter().enumerate() {
                sum += hv * self.weights_ho[h * self.outputs + o];
            }
            *value = sum;
        }
        output
    }
}

impl Policy for FeedForwardNet {
    fn activate(&self, inputs: &[f32]) -> Vec<f32> {
        self.forward(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_random_has_correct_dimensions() {
        let mut rng = GameRng::new(3);
        let net = FeedForwardNet::new_random(3, 4, 3, &mut rng);
        assert_eq!(net.weights_ih.len(), 12);
        assert_eq!(net.weights_ho.len(), 12);
        assert_eq!(net.bias_h.len(), 4);
        assert_eq!(net.bias_o.len(), 3);
        assert!(net.is_well_formed());
        assert!(net.weights_ih.iter().all(|w| (-1.0..1.0).contains(w)));
    }

    #[test]
    fn test_forward_is_deterministic() {
        let mut rng = GameRng::new(11);
        let net = FeedForwardNet::new_random(3, 5, 3, &mut rng);
        let inputs = [200.0, 250.0, 330.0];
        assert_eq!(net.forward(&inputs), net.forward(&inputs));
        assert_eq!(net.forward(&inputs).len(), 3);
    }

    #[test]
    fn test_forward_by_hand() {
        let net = FeedForwardNet {
            inputs: 2,
            hidden: 1,
            outputs: 2,
            weights_ih: vec![1.0, 0.0],
            weights_ho: vec![2.0, -1.0],
            bias_h: vec![0.0],
            bias_o: vec![0.5, 0.0],
        };
        let out = net.forward(&[0.5, 100.0]);
        let h = 0.5f32.tanh();
        assert!((out[0] - (0.5 + 2.0 * h)).abs() < 1e-6);
        assert!((out[1] + h).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_network_is_detected() {
        let mut rng = GameRng::new(5);
        let mut net = FeedForwardNet::new_random(3, 2, 3, &mut rng);
        net.bias_o.pop();
        assert!(!net.is_well_formed());
    }

    #[test]
    fn test_same_seed_same_network() {
        let a = FeedForwardNet::new_random(3, 4, 3, &mut GameRng::new(42));
        let b = FeedForwardNet::new_random(3, 4, 3, &mut GameRng::new(42));
        assert_eq!(a, b);
    }
}
